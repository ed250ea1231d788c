use ghpm::core::GhpmResult;

/// Accepts a target and does nothing with it.
pub fn run(target: String) -> GhpmResult<()> {
    tracing::debug!(query = %target, "search has no behaviour yet");
    Ok(())
}
