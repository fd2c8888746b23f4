/// What to do with a final group of fewer than four lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingPolicy {
    /// Keep it, treat missing lines as empty and validate it like any other record.
    Validate,
    /// Fail the load with `IncompleteRecord`.
    Reject,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub trailing: TrailingPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            trailing: TrailingPolicy::Validate,
        }
    }
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            trailing: TrailingPolicy::Reject,
        }
    }
}
