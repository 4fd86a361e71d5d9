//! Shared test fixtures: a known element set and an in-process element source

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{ElementSet, ElementSource, NetworkError};

/// Vanguard 1 element set used by the SGP4 verification suite
pub const VANGUARD_LINE1: &str =
    "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
pub const VANGUARD_LINE2: &str =
    "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";
pub const VANGUARD_TLE: &str = "VANGUARD 1
1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753
2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667
";

pub fn vanguard() -> ElementSet {
    ElementSet {
        name: "VANGUARD 1".to_string(),
        line1: VANGUARD_LINE1.to_string(),
        line2: VANGUARD_LINE2.to_string(),
    }
}

/// Epoch of the Vanguard 1 element set (day 179.78495062 of 2000)
pub fn vanguard_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 6, 27, 18, 50, 19).unwrap() + Duration::microseconds(733_568)
}

/// Element source that replays scripted results and counts fetches
pub struct ScriptedSource {
    results: RefCell<Vec<Result<ElementSet, NetworkError>>>,
    fallback: ElementSet,
    fetches: Cell<usize>,
}

impl ScriptedSource {
    /// A source that always succeeds with the given element set
    pub fn always(elements: ElementSet) -> Self {
        Self {
            results: RefCell::new(Vec::new()),
            fallback: elements,
            fetches: Cell::new(0),
        }
    }

    /// A source that returns `results` in order, then falls back to Vanguard 1
    pub fn sequence(mut results: Vec<Result<ElementSet, NetworkError>>) -> Self {
        results.reverse();
        Self {
            results: RefCell::new(results),
            fallback: vanguard(),
            fetches: Cell::new(0),
        }
    }

    /// Number of times `fetch` has been called
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl ElementSource for ScriptedSource {
    async fn fetch(&self) -> Result<ElementSet, NetworkError> {
        self.fetches.set(self.fetches.get() + 1);
        match self.results.borrow_mut().pop() {
            Some(result) => result,
            None => Ok(self.fallback.clone()),
        }
    }
}
