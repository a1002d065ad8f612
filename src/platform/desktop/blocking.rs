/// Runs a blocking call from an event handler or effect. The desktop
/// webview has a single UI thread, so this is a plain call today; the
/// signature leaves room for a worker-thread hop on other platforms.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T,
{
    f()
}
