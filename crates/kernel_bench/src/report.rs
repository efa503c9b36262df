// The two result lines every benchmark prints.

use std::fmt;

use par_kernels::DataType;

/// Significant digits [`General`] prints when no precision is given.
pub const DEFAULT_PRECISION: usize = 6;

/// Formats a float in general notation: fixed or scientific, whichever is
/// shorter for the number of significant digits, with trailing zeros
/// removed. `0.5`, `12.3457`, `1.5e-05`, `1.23457e+06`.
///
/// The number of significant digits is the formatter precision, or
/// [`DEFAULT_PRECISION`].
#[derive(Clone, Copy, Debug)]
pub struct General(pub f64);

impl fmt::Display for General {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION).max(1);

        if x.is_nan() {
            return f.write_str(if x.is_sign_negative() { "-nan" } else { "nan" });
        }
        if x.is_infinite() {
            return f.write_str(if x < 0.0 { "-inf" } else { "inf" });
        }
        if x == 0.0 {
            return f.write_str(if x.is_sign_negative() { "-0" } else { "0" });
        }

        // decimal exponent after rounding to the requested digits
        let scientific = format!("{:.*e}", precision - 1, x);
        let Some((mantissa, exponent)) = scientific.split_once('e') else {
            return f.write_str(&scientific);
        };
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

        if exponent < -4 || exponent >= precision as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{sign}{:02}",
                trim_fraction(mantissa),
                exponent.unsigned_abs()
            )
        } else {
            let decimals = (precision as i32 - 1 - exponent) as usize;
            f.write_str(trim_fraction(&format!("{x:.decimals$}")))
        }
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// What a benchmark reports after its timing line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Checksum(f64),
    Valid(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Report {
    pub elapsed_ms: f64,
    pub outcome: Outcome,
}

impl Report {
    pub fn new(elapsed_ms: f64, outcome: Outcome) -> Self {
        Self {
            elapsed_ms,
            outcome,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time:     {}ms", General(self.elapsed_ms))?;
        match self.outcome {
            Outcome::Checksum(sum) => write!(f, "Checksum: {}", General(sum)),
            Outcome::Valid(valid) => write!(f, "Valid? -> {valid}"),
        }
    }
}

/// Sum of `values`. The running total is kept in single precision, but each
/// addition is carried out in double precision before rounding back.
pub fn checksum(values: &[DataType]) -> f64 {
    let sum = values
        .iter()
        .fold(0.0 as DataType, |acc, &v| {
            (f64::from(acc) + f64::from(v)) as DataType
        });
    f64::from(sum)
}
