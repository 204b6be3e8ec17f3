// file: src/pipeline/access.rs
// description: capability token proving the caller passed human verification
// reference: session flag modeled as a value instead of ambient state

/// Proof that the caller passed the CAPTCHA. The resolution entry point takes
/// one by value, so every caller has to decide where it comes from.
///
/// Outside this crate it can only come from a verified session, or from
/// `trusted_local` when the `cli` feature is enabled:
///
/// ```compile_fail
/// let token = campus_qa::HumanVerified { _private: () };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanVerified {
    _private: (),
}

impl HumanVerified {
    pub(crate) fn granted() -> Self {
        Self { _private: () }
    }

    /// For trusted local entry points (CLI, tests) that have no session.
    #[cfg(any(test, feature = "cli"))]
    pub fn trusted_local() -> Self {
        Self::granted()
    }
}
