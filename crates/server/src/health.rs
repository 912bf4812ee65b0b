/// Liveness probe.
pub async fn get() -> &'static str {
    "OK!"
}
