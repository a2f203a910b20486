//! Result and target adaptation between frameworks

/// Outcome of adapting one result item into another framework's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adaptation<T> {
    /// The item has a counterpart in the receiving framework
    Adapted(T),
    /// The item cannot be represented; carries a human-readable reason
    Unsupported(String),
}

impl<T> Adaptation<T> {
    /// Adapted if `item` is present, otherwise unsupported with `reason`
    pub fn from_option(item: Option<T>, reason: impl FnOnce() -> String) -> Self {
        match item {
            Some(item) => Self::Adapted(item),
            None => Self::Unsupported(reason()),
        }
    }

    pub fn is_adapted(&self) -> bool {
        matches!(self, Self::Adapted(_))
    }

    /// The adapted item, discarding the reason of an unsupported one
    pub fn into_adapted(self) -> Option<T> {
        match self {
            Self::Adapted(item) => Some(item),
            Self::Unsupported(_) => None,
        }
    }
}

/// Converts result items of framework A into items of framework B
pub trait ResultAdapter<A, B>: Send + Sync {
    fn adapt(&self, item: A) -> Adaptation<B>;
}

impl<A, B, F> ResultAdapter<A, B> for F
where
    F: Fn(A) -> Adaptation<B> + Send + Sync,
{
    fn adapt(&self, item: A) -> Adaptation<B> {
        self(item)
    }
}

/// Forwards items whose type already fits the receiving framework
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl<A, B> ResultAdapter<A, B> for PassThrough
where
    A: Into<B>,
{
    fn adapt(&self, item: A) -> Adaptation<B> {
        Adaptation::Adapted(item.into())
    }
}

/// Maps a framework-B search target to its framework-A counterpart
///
/// Returning `None` means the target has no counterpart and nothing is
/// searched in framework A.
pub trait TargetAdapter<B, A>: Send + Sync {
    fn adapt(&self, target: &B) -> Option<A>;
}

impl<B, A, F> TargetAdapter<B, A> for F
where
    F: Fn(&B) -> Option<A> + Send + Sync,
{
    fn adapt(&self, target: &B) -> Option<A> {
        self(target)
    }
}
