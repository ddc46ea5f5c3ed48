use crate::formula::LOG_TARGET;

/// Merges histograms encoded as `<bound>=<count>;<bound>=<count>;...`.
///
/// All merged histograms must share the same set of bounds. Once two inputs
/// disagree, or an input cannot be parsed, the builder becomes invalid and
/// [`build`](Self::build) yields nothing. An input without any entry, such as
/// `""`, contributes nothing and leaves the builder as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeDistributionBuilder {
    state: State,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum State {
    #[default]
    Empty,
    Valid(Vec<(f64, i64)>),
    Invalid,
}

impl RangeDistributionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, data: &str) -> &mut Self {
        let parsed = parse(data);
        self.state = match (core::mem::take(&mut self.state), parsed) {
            (State::Invalid, _) | (_, None) => State::Invalid,
            (state, Some(entries)) if entries.is_empty() => state,
            (State::Empty, Some(entries)) => State::Valid(entries),
            (State::Valid(mut current), Some(entries)) => {
                if same_bounds(&current, &entries) {
                    for ((_, count), (_, added)) in current.iter_mut().zip(&entries) {
                        *count = count.wrapping_add(*added);
                    }
                    State::Valid(current)
                } else {
                    log::debug!(target: LOG_TARGET, "Distribution bounds differ, discarding distribution");
                    State::Invalid
                }
            }
        };
        self
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !matches!(self.state, State::Invalid)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    /// The merged encoding, or `None` if nothing was added or the builder is invalid
    #[must_use]
    pub fn build(&self) -> Option<String> {
        match &self.state {
            State::Valid(entries) => Some(
                entries
                    .iter()
                    .map(|(bound, count)| format!("{bound}={count}"))
                    .collect::<Vec<_>>()
                    .join(";"),
            ),
            State::Empty | State::Invalid => None,
        }
    }
}

fn parse(data: &str) -> Option<Vec<(f64, i64)>> {
    let mut entries = Vec::new();
    for pair in data.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (bound, count) = pair.split_once('=')?;
        let bound: f64 = bound.trim().parse().ok()?;
        let count: i64 = count.trim().parse().ok()?;
        if !bound.is_finite() {
            return None;
        }
        entries.push((bound, count));
    }

    entries.sort_by(|a, b| a.0.total_cmp(&b.0));
    Some(entries)
}

fn same_bounds(left: &[(f64, i64)], right: &[(f64, i64)]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.0.total_cmp(&r.0).is_eq())
}
