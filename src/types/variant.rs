use super::field::Field;

/// Component tag used by variants that do not name their own.
pub const DEFAULT_COMPONENT: &str = "base-setting";

/// A concrete field kind.
///
/// Variants share the [`Field`] shape and differ only in their `type`
/// discriminator and the rendering component, both fixed per kind rather
/// than per instance.
///
/// ```
/// use fieldwise::Variant;
///
/// struct TextInput;
///
/// impl Variant for TextInput {
///     const NAME: &'static str = "TextInput";
///     const COMPONENT: &'static str = "text-setting";
/// }
///
/// let field = TextInput::create("store_name", "");
/// assert_eq!(field.field_type(), "text_input");
/// assert_eq!(field.component(), "text-setting");
/// assert_eq!(field.label(), "Store Name");
/// ```
pub trait Variant {
    /// Type name, snake-cased into the default `type` discriminator.
    const NAME: &'static str;

    /// A fixed `type`. Takes priority over the one derived from [`NAME`](Self::NAME).
    const TYPE: Option<&'static str> = None;

    const COMPONENT: &'static str = DEFAULT_COMPONENT;

    /// Create a field of this variant. See [`Field::create`].
    fn create(id: &str, label: &str) -> Field
    where
        Self: Sized,
    {
        Field::create::<Self>(id, label)
    }
}

/// The plain base variant: type `"base"`, component `"base-setting"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base;

impl Variant for Base {
    const NAME: &'static str = "Base";
}

/// Snake-case a type name: `TextInput` becomes `text_input`.
///
/// Only ASCII letters take part. Input made solely of ASCII lowercase letters
/// is returned unchanged. Otherwise each word gets an ASCII-uppercased first
/// letter, whitespace is removed, and an underscore goes before every ASCII
/// uppercase letter that is not the first character. Other characters pass
/// through as they are.
pub(crate) fn snake_case(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase()) {
        return name.to_owned();
    }

    let joined: String = name.split_whitespace().map(capitalize_first).collect();

    let mut out = String::with_capacity(joined.len() + 4);
    for (i, c) in joined.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Characters that neither start nor end a word, so `don't` stays one word.
fn is_case_ignorable(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '.' | ':' | '^' | '`' | '\u{b7}' | '\u{ad}')
}

/// Title-case text: a letter following a cased letter is lower-cased, any
/// other letter is upper-cased. Digits and punctuation end a word, so
/// `sku-code` becomes `Sku-Code` and `item2name` becomes `Item2Name`.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_cased = false;
    for c in text.chars() {
        if is_case_ignorable(c) {
            out.push(c);
            continue;
        }
        if after_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_uppercase())
            .chain(chars)
            .collect(),
        None => String::new(),
    }
}
