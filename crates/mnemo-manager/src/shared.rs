//! Shared-segment access grants and revocations.

use mnemo_core::ErrorKind;

use crate::manager::Manager;

impl Manager {
    /// Validate that `program` exists and `segment` names a shared segment.
    fn shared_target(&mut self, program: &str, segment: &str) -> bool {
        if !self.programs.contains_key(program) {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{program}' doesn't exist"),
                program,
            );
            return false;
        }
        match self.registry.get(segment) {
            Some(element) if element.as_shared().is_some() => true,
            Some(_) => {
                self.errors.record(
                    ErrorKind::AccessError,
                    format!("'{segment}' is not a shared segment"),
                    program,
                );
                false
            }
            None => {
                self.errors.record(
                    ErrorKind::AccessError,
                    format!("shared segment '{segment}' doesn't exist"),
                    program,
                );
                false
            }
        }
    }

    /// Add `program` as an owner of `segment`.
    ///
    /// The full segment size is charged to the new owner's quota. Asking
    /// for a segment the program already owns is an AccessError and
    /// changes nothing.
    pub fn get_access_to_shared(&mut self, program: &str, segment: &str) -> bool {
        if !self.shared_target(program, segment) {
            return false;
        }
        let Some(shared) = self.registry.get(segment).and_then(|e| e.as_shared()) else {
            return false;
        };
        if shared.check_access(program) {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{program}' already has access to '{segment}'"),
                program,
            );
            return false;
        }
        let size = shared.placement().size();
        let fits = self
            .programs
            .get(program)
            .is_some_and(|p| p.possible_for_expansion(size, &self.registry));
        if !fits {
            self.errors.record(
                ErrorKind::SizeError,
                format!("the memory limit in the '{program}' program has been exceeded"),
                program,
            );
            return false;
        }

        if let Some(shared) = self.registry.get_mut(segment).and_then(|e| e.as_shared_mut()) {
            shared.insert_owner(program);
        }
        if let Some(prog) = self.programs.get_mut(program) {
            prog.insert_element(segment);
        }
        tracing::debug!(program, segment, "shared access granted");
        true
    }

    /// Remove `program` from the owners of `segment`.
    ///
    /// The last owner cannot revoke; it must destroy the segment instead,
    /// so that attempt is reported as a MemoryLeak.
    pub fn revoke_access_to_shared(&mut self, program: &str, segment: &str) -> bool {
        if !self.shared_target(program, segment) {
            return false;
        }
        let Some(shared) = self.registry.get(segment).and_then(|e| e.as_shared()) else {
            return false;
        };
        if !shared.check_access(program) {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{program}' doesn't have access to '{segment}'"),
                program,
            );
            return false;
        }
        if shared.is_last() {
            self.errors.record(
                ErrorKind::MemoryLeak,
                format!("program '{program}' is the last owner of '{segment}' and must destroy it"),
                program,
            );
            return false;
        }

        if let Some(shared) = self.registry.get_mut(segment).and_then(|e| e.as_shared_mut()) {
            shared.erase_owner(program);
        }
        if let Some(prog) = self.programs.get_mut(program) {
            prog.erase_element(segment);
        }
        tracing::debug!(program, segment, "shared access revoked");
        true
    }
}
