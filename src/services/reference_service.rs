use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Country {
    pub code: String,
    pub name: String,
}

static COUNTRIES: RwLock<Option<Arc<Vec<Country>>>> = RwLock::new(None);

/// Reference list of countries, parsed once per process lifetime and shared
/// behind an Arc. `reset_countries` clears the cache for tests.
pub fn countries() -> Result<Arc<Vec<Country>>> {
    if let Some(cached) = COUNTRIES.read().expect("countries lock poisoned").as_ref() {
        return Ok(cached.clone());
    }

    let parsed: Vec<Country> = serde_json::from_str(include_str!("../data/countries.json"))?;
    let shared = Arc::new(parsed);
    let mut guard = COUNTRIES.write().expect("countries lock poisoned");
    // A concurrent loader may have won the race; keep whichever is present.
    if guard.is_none() {
        *guard = Some(shared.clone());
    }
    Ok(guard.as_ref().expect("cache populated above").clone())
}

pub fn reset_countries() {
    *COUNTRIES.write().expect("countries lock poisoned") = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the cache is process-global, so splitting these cases
    // across parallel test threads would race on reset_countries.
    #[test]
    fn loads_once_and_reset_reloads() {
        reset_countries();
        let first = countries().unwrap();
        let second = countries().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!first.is_empty());

        reset_countries();
        let third = countries().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first.len(), third.len());
    }
}
