/// Compile a literal regex once per process and hand out a `&'static Regex`.
///
/// Only for literals known to be valid; the compiler's rewrite table and the
/// bracket scanner are built from it.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
