use std::{fmt, str::FromStr};

use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Statistic {
    /// Coverage weighted mean of the cell values
    Mean,
    /// Coverage weighted sum of the cell values
    Sum,
    /// Sum of the coverage fractions
    Count,
    Min,
    Max,
}

impl Statistic {
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Sum => "sum",
            Statistic::Count => "count",
            Statistic::Min => "min",
            Statistic::Max => "max",
        }
    }
}

impl FromStr for Statistic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Statistic::Mean),
            "sum" => Ok(Statistic::Sum),
            "count" => Ok(Statistic::Count),
            "min" => Ok(Statistic::Min),
            "max" => Ok(Statistic::Max),
            _ => Err(Error::InvalidArgument(format!("Unsupported zonal statistic: '{s}'"))),
        }
    }
}

/// A zonal statistic request, e.g. `mean` or `mean(default_value=0)`
///
/// When a default value is present, nodata cells contribute the default value instead of being ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Operation {
    pub statistic: Statistic,
    pub default_value: Option<f64>,
}

impl Operation {
    pub const fn new(statistic: Statistic) -> Self {
        Operation {
            statistic,
            default_value: None,
        }
    }

    pub const fn with_default_value(statistic: Statistic, default_value: f64) -> Self {
        Operation {
            statistic,
            default_value: Some(default_value),
        }
    }

    /// Name of the result attribute
    pub fn name(&self) -> &'static str {
        self.statistic.name()
    }
}

impl Default for Operation {
    fn default() -> Self {
        Operation::with_default_value(Statistic::Mean, 0.0)
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((name, args)) = s.split_once('(') else {
            return Ok(Operation::new(s.parse()?));
        };

        let args = args
            .strip_suffix(')')
            .ok_or_else(|| Error::InvalidArgument(format!("Missing closing parenthesis in operation: '{s}'")))?;

        let mut op = Operation::new(name.trim().parse()?);
        for arg in args.split(',').map(str::trim).filter(|arg| !arg.is_empty()) {
            match arg.split_once('=').map(|(key, val)| (key.trim(), val.trim())) {
                Some(("default_value", val)) => {
                    op.default_value = Some(
                        val.parse()
                            .map_err(|_| Error::InvalidNumber(format!("Invalid default value in operation '{s}': '{val}'")))?,
                    );
                }
                _ => return Err(Error::InvalidArgument(format!("Unsupported operation argument '{arg}' in '{s}'"))),
            }
        }

        Ok(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.default_value {
            Some(val) => write!(f, "{}(default_value={val})", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}
