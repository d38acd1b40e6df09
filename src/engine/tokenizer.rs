use crate::Decomposition;

/// Width of one component code segment: three uppercase letters followed by
/// three digits.
pub const SEGMENT_LEN: usize = 6;

/// Default ceiling on how many component codes a bundle token may pack.
///
/// The marketplace encoding observed in the wild never exceeds four
/// concatenated codes (24 characters). Callers with a deeper catalogue can
/// raise it via [`decompose_with_limit`].
pub const MAX_BUNDLE_COMPONENTS: usize = 4;

/// Decompose a raw listing token into its component SKUs using the default
/// bundle ceiling.
///
/// # Example
/// ```
/// use stockline::decompose;
///
/// let d = decompose("ABC123DEF456-M");
/// assert_eq!(d.components, vec!["ABC123-M", "DEF456-M"]);
/// assert!(d.is_bundle);
/// ```
pub fn decompose(token: &str) -> Decomposition {
    decompose_with_limit(token, MAX_BUNDLE_COMPONENTS)
}

/// Decompose with an explicit ceiling on bundle component count.
///
/// The token splits on the *first* `-` into a code and a size designator;
/// any later `-` belongs to the size. The code must partition into 1 to
/// `max_components` segments, each matching `[A-Z]{3}[0-9]{3}`, to be
/// recognized. A single valid segment is a plain item, never a bundle.
/// Anything that fails the length or pattern check falls back to one opaque
/// component equal to the trimmed token, so this function never errors.
pub fn decompose_with_limit(token: &str, max_components: usize) -> Decomposition {
    let trimmed = token.trim();

    let Some((code, size)) = trimmed.split_once('-') else {
        // No separator: irreducible single component, no size split.
        return single(trimmed);
    };
    let code = code.trim();
    let size = size.trim();

    let len = code.len();
    let valid_length = len >= SEGMENT_LEN && len <= SEGMENT_LEN * max_components && len % SEGMENT_LEN == 0;
    // Segments are sliced bytewise; a non-ASCII code can't match the
    // pattern anyway, so send it down the fallback path before slicing.
    if !valid_length || !code.is_ascii() {
        return single(trimmed);
    }

    let segments: Vec<&str> = (0..len).step_by(SEGMENT_LEN).map(|i| &code[i..i + SEGMENT_LEN]).collect();
    if !segments.iter().all(|seg| regex!("^[A-Z]{3}[0-9]{3}$").is_match(seg)) {
        return single(trimmed);
    }

    let components = segments.iter().map(|seg| format!("{seg}-{size}")).collect::<Vec<_>>();
    let is_bundle = components.len() >= 2;
    Decomposition { components, is_bundle }
}

fn single(token: &str) -> Decomposition {
    Decomposition { components: vec![token.to_string()], is_bundle: false }
}
