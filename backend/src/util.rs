/// Run the operation, retrying up to `retries` more times while it fails.
pub fn retry<T, E, F>(retries: u32, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
{
    let mut result = operation();
    for _ in 0..retries {
        if result.is_ok() {
            break;
        }
        result = operation();
    }
    result
}
