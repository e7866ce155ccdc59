#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Rule`](crate::Rule) table entry.
///
/// ```text
/// rule! {
///     name: "plain YYYY-YY",
///     stage: Stage::ClosedRange,
///     pattern: r"...",
///     arity: 2,
///     buckets: BucketMask::HAS_HYPHEN.bits(),
///     prod: |cap, ctx| { ... },
/// }
/// ```
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        stage: $stage:expr,
        pattern: $pat:literal,
        arity: $arity:expr
        $(, buckets: $buckets:expr)?
        , prod: |$cap:ident, $ctx:ident| $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            stage: $stage,
            pattern: $crate::regex!($pat),
            arity: $arity,
            production: Box::new(
                move |$cap: &$crate::Captured<'_>, $ctx: &$crate::Context| -> $crate::Result<$crate::RangeExpression> {
                    $body
                },
            ),
            buckets: { 0 $(| $buckets)? },
        }
    }};
}
