use std::fmt;

use crate::{geometry::BBox, layer::Layer};

/// A single finding. Whether it blocks depends on which list it lands in.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    MissingProps {
        layer: Layer,
        index: usize,
        missing: Vec<&'static str>,
    },
    DuplicateId {
        layer: Layer,
        id: String,
    },
    UnknownMicroMarket {
        locality: String,
        micro_market: String,
    },
    OutOfRange {
        layer: Layer,
        index: usize,
        bbox: BBox,
    },
    OutsideCity {
        locality: String,
    },
    OutsideMicroMarket {
        locality: String,
        micro_market: String,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::MissingProps { layer, index, missing } => {
                write!(f, "{layer} feature #{index} missing props: {}", missing.join(", "))
            }
            Problem::DuplicateId { layer, id } => {
                write!(f, "{layer} duplicate {}: {id}", layer.id_prop())
            }
            Problem::UnknownMicroMarket { locality, micro_market } => {
                write!(f, "Locality {locality} refers to unknown MicroMarketID {micro_market}")
            }
            Problem::OutOfRange { layer, index, bbox } => {
                write!(f, "{layer} feature #{index} has out-of-range coords (not WGS84?): {bbox}")
            }
            Problem::OutsideCity { locality } => {
                write!(f, "Locality {locality} centroid seems outside city bbox (check geometry)")
            }
            Problem::OutsideMicroMarket { locality, micro_market } => write!(
                f,
                "Locality {locality} centroid seems outside its MicroMarket bbox (id={micro_market})"
            ),
        }
    }
}

/// Outcome of a run: blocking errors and advisory warnings, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<Problem>,
    pub warnings: Vec<Problem>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let section = |f: &mut fmt::Formatter<'_>, title: &str, items: &[Problem]| -> fmt::Result {
            writeln!(f)?;
            writeln!(f, "{title}:")?;
            for p in items {
                writeln!(f, "- {p}")?;
            }
            Ok(())
        };

        writeln!(f, "Validation complete.")?;
        if self.errors.is_empty() {
            writeln!(f, "No blocking errors found.")?;
        } else {
            section(f, "Errors", self.errors.as_slice())?;
        }
        if !self.warnings.is_empty() {
            section(f, "Warnings", self.warnings.as_slice())?;
        }
        Ok(())
    }
}
