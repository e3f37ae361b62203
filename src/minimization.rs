//! Minimization across prognostic factors.

use crate::assignment::Assignment;
use crate::error::ValidationError;
use crate::tie_break;
use rand::Rng;
use tracing::trace;

/// Counts of prior subjects per treatment, restricted to the factor levels of
/// the subject about to be allocated.
///
/// Suppose sex and race are the prognostic factors and the next subject is a
/// Hispanic female. Row `t` then holds the number of females and the number of
/// Hispanic subjects already on treatment `t`:
///
/// ```text
///              Female  Hispanic
/// Treatment 1      10         2
/// Treatment 2       9         2
/// ```
///
/// Every row must cover the same factors and there must be at least two
/// treatments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    rows: Vec<Vec<u64>>,
}

impl Tally {
    /// Validate and wrap a treatment × factor count matrix.
    ///
    /// # Errors
    ///
    /// * [`ValidationError::TooFewTreatments`] for fewer than two rows.
    /// * [`ValidationError::RaggedTally`] when rows differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocation::Tally;
    ///
    /// let tally = Tally::new(vec![vec![10, 2], vec![9, 2]]).unwrap();
    /// assert_eq!(tally.treatments(), 2);
    /// assert_eq!(tally.totals(), vec![12, 11]);
    /// assert!(Tally::new(vec![vec![1, 2], vec![3]]).is_err());
    /// ```
    pub fn new(rows: Vec<Vec<u64>>) -> Result<Self, ValidationError> {
        if rows.len() < 2 {
            return Err(ValidationError::TooFewTreatments { actual: rows.len() });
        }
        let expected = rows[0].len();
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(ValidationError::RaggedTally {
                row,
                expected,
                actual,
            });
        }
        Ok(Self { rows })
    }

    /// Number of treatments.
    pub fn treatments(&self) -> usize {
        self.rows.len()
    }

    /// Number of factors per treatment.
    ///
    /// ```
    /// use allocation::Tally;
    ///
    /// let tally = Tally::new(vec![vec![3, 1, 4], vec![1, 5, 9]]).unwrap();
    /// assert_eq!(tally.treatments(), 2);
    /// assert_eq!(tally.factors(), 3);
    /// ```
    pub fn factors(&self) -> usize {
        self.rows[0].len()
    }

    /// Per-treatment sum across factors.
    pub fn totals(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.iter().sum()).collect()
    }
}

/// Allocate the next subject by minimization.
///
/// The subject goes to the treatment with the smallest factor total in
/// `tally`, with ties broken uniformly at random. Before any subject has been
/// allocated (all totals zero) every treatment is equally likely.
///
/// Returns the 1-based treatment index, or the matching entry of
/// `group_labels` when labels are supplied.
///
/// # Errors
///
/// [`ValidationError::LengthMismatch`] when `group_labels` does not have one
/// entry per treatment.
///
/// # Examples
///
/// ```
/// use allocation::{Assignment, Tally, minimization};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let tally = Tally::new(vec![vec![10, 9], vec![2, 2]]).unwrap();
/// let mut rng = StdRng::seed_from_u64(0);
/// assert_eq!(minimization(&tally, None, &mut rng).unwrap(), Assignment::Index(2));
///
/// let labels = ["Treatment 1".to_owned(), "Treatment 2".to_owned()];
/// let group = minimization(&tally, Some(&labels[..]), &mut rng).unwrap();
/// assert_eq!(group.label(), Some("Treatment 2"));
/// ```
pub fn minimization<R>(
    tally: &Tally,
    group_labels: Option<&[String]>,
    rng: &mut R,
) -> Result<Assignment, ValidationError>
where
    R: Rng + ?Sized,
{
    if let Some(labels) = group_labels {
        if labels.len() != tally.treatments() {
            return Err(ValidationError::LengthMismatch {
                name: "group_labels",
                expected: tally.treatments(),
                actual: labels.len(),
            });
        }
    }

    let totals = tally.totals();
    // Tally::new guarantees at least two treatments.
    let position = if totals.iter().all(|&total| total == 0) {
        rng.random_range(0..totals.len())
    } else {
        tie_break::argmin(&totals, rng).unwrap_or(0)
    };
    trace!(?totals, position, "minimization allocation");

    Ok(Assignment::resolve(position, group_labels))
}
