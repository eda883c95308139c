mod from_google;
mod to_google;

/// Convert from Google API types to manaba-sync types
pub trait FromGoogle<T> {
    fn from_google(value: T) -> anyhow::Result<Self>
    where
        Self: Sized;
}

/// Convert to Google API types from manaba-sync types
pub trait ToGoogle<T> {
    fn to_google(&self) -> T;
}
