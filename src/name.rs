use core::{convert::Infallible, fmt, str::FromStr};

use thiserror::Error;

use crate::tlv::{parse_tlvs, Encode, TlvDecodingError, Write, TLV};

/// A hierarchical NDN name, such as `/prefix/video/42`.
///
/// Components are opaque text. The root name has no components and renders as `/`.
/// Ordering is lexicographic, component by component.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub struct Name {
    components: Vec<String>,
}

impl Name {
    pub const TLV_TYPE: u32 = 7;

    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Splits on `/`, dropping the empty components that come from repeated,
    /// leading or trailing slashes. Never fails: `"//"` is simply the root name.
    pub fn parse(text: &str) -> Self {
        Self::from_components(text.split('/').filter(|c| !c.is_empty()))
    }

    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> impl Iterator<Item = &str> + '_ {
        self.components.iter().map(String::as_str)
    }

    /// The trailing component, or `""` for the root name.
    pub fn last_component(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or("")
    }

    /// Drops the last `drop_count` components.
    ///
    /// Callers must check the length first: panics if `drop_count` exceeds
    /// the number of components.
    pub fn prefix(&self, drop_count: usize) -> Name {
        assert!(
            drop_count <= self.components.len(),
            "cannot drop {} components from {} ({} present)",
            drop_count,
            self,
            self.components.len()
        );
        let keep = self.components.len() - drop_count;
        Name {
            components: self.components[..keep].to_vec(),
        }
    }

    /// Borrows the first `n` components. Panics if `n` is out of range.
    pub fn sub_components(&self, n: usize) -> &[String] {
        assert!(
            n <= self.components.len(),
            "invalid number of subcomponents requested: {} of {}",
            n,
            self.components.len()
        );
        &self.components[..n]
    }

    pub fn append(&mut self, component: impl Into<String>) {
        self.components.push(component.into());
    }

    pub fn appending(&self, component: impl Into<String>) -> Name {
        let mut name = self.clone();
        name.append(component);
        name
    }

    pub fn is_prefix_of(&self, other: &Name) -> bool {
        other.components.starts_with(&self.components)
    }

    pub fn try_decode(bytes: &[u8]) -> Result<Self, NameDecodingError> {
        let (tlv, len) = TLV::try_decode(bytes)?;
        if tlv.typ.get() != Self::TLV_TYPE {
            return Err(NameDecodingError::NotAName(tlv.typ.get()));
        }
        if len != bytes.len() {
            return Err(NameDecodingError::TrailingBytes(bytes.len() - len));
        }
        Self::try_decode_components(tlv.val)
    }

    /// Decodes the value part of a name TLV, i.e. the concatenated component TLVs.
    pub fn try_decode_components(component_bytes: &[u8]) -> Result<Self, NameDecodingError> {
        let mut components = Vec::new();
        for nc in parse_tlvs(component_bytes) {
            let nc = nc?;
            if nc.typ.get() != COMPONENT_TYPE_GENERIC {
                return Err(NameDecodingError::UnsupportedComponentType(nc.typ.get()));
            }
            let text = core::str::from_utf8(nc.val).map_err(|_| NameDecodingError::NotText)?;
            components.push(text.to_owned());
        }
        Ok(Name { components })
    }

    fn component_tlvs(&self) -> impl Iterator<Item = TLV<'_>> + '_ {
        self.components.iter().map(|c| TLV {
            typ: GENERIC_COMPONENT_TYPE,
            val: c.as_bytes(),
        })
    }

    fn component_len(&self) -> usize {
        self.component_tlvs().map(|tlv| tlv.encoded_length()).sum()
    }
}

// Only generic components are produced by text parsing, so they are all we accept back.
const COMPONENT_TYPE_GENERIC: u32 = 8;
const GENERIC_COMPONENT_TYPE: core::num::NonZeroU32 =
    match core::num::NonZeroU32::new(COMPONENT_TYPE_GENERIC) {
        Some(typ) => typ,
        None => unreachable!(),
    };

impl Encode for Name {
    fn encoded_length(&self) -> usize {
        let component_len = self.component_len();
        (Self::TLV_TYPE as u64).encoded_length()
            + (component_len as u64).encoded_length()
            + component_len
    }

    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        (Self::TLV_TYPE as u64).encode(writer)?;
        (self.component_len() as u64).encode(writer)?;
        for tlv in self.component_tlvs() {
            tlv.encode(writer)?;
        }
        Ok(())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("/");
        }
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameDecodingError {
    #[error(transparent)]
    Tlv(#[from] TlvDecodingError),
    #[error("expected a name TLV, found type {0}")]
    NotAName(u32),
    #[error("{0} bytes left after the name TLV")]
    TrailingBytes(usize),
    #[error("unsupported name component type {0}")]
    UnsupportedComponentType(u32),
    #[error("name component is not valid UTF-8")]
    NotText,
}
