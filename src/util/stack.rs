/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first growing the native stack if less than [`RED_ZONE`] bytes
/// remain.
///
/// Wrap every recursive step of the parser or the evaluator that can be
/// driven by user input, such as routine calls, nested blocks and nested
/// expressions.
///
/// ## Example
/// ```
/// use algorithmique::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     if n == 0 { 0 } else { ensure_sufficient_stack(|| 1 + depth(n - 1)) }
/// }
///
/// assert_eq!(depth(50_000), 50_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
