/// State of an asynchronous feed fetch
#[derive(Clone, PartialEq)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&String> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_state_accessors() {
        let loading: FetchState<u32> = FetchState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.data(), None);

        assert_eq!(FetchState::Success(3).data(), Some(&3));
        assert_eq!(FetchState::<u32>::Error("down".into()).error().map(String::as_str), Some("down"));
        assert!(matches!(FetchState::<u32>::default(), FetchState::NotStarted));
    }
}
