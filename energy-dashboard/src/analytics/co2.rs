use energy_domain::{
    domain::{Co2Grade, Grade, UsageTable, UtilityColumn},
    AnalysisError,
};

/// Rows are assumed monthly; spacing of the timestamps is not checked.
pub const MONTHS_PER_YEAR: f64 = 12.0;

const GRADE_A_BELOW: f64 = 400.0;
const GRADE_B_BELOW: f64 = 600.0;
const GRADE_C_BELOW: f64 = 800.0;

/// Annualized CO2 (mean monthly tons * 12) and its benchmark grade.
pub fn grade_co2(table: &UsageTable) -> Result<Co2Grade, AnalysisError> {
    let mean_tons = table
        .mean(UtilityColumn::Co2)
        .ok_or(AnalysisError::EmptyTable)?;
    let annual_co2_tons = mean_tons * MONTHS_PER_YEAR;

    Ok(Co2Grade {
        annual_co2_tons,
        grade: classify_annual_co2(annual_co2_tons),
    })
}

/// Each lower bound belongs to the worse grade: 400.0 is B, not A.
pub fn classify_annual_co2(annual_co2_tons: f64) -> Grade {
    if annual_co2_tons < GRADE_A_BELOW {
        Grade::A
    } else if annual_co2_tons < GRADE_B_BELOW {
        Grade::B
    } else if annual_co2_tons < GRADE_C_BELOW {
        Grade::C
    } else {
        Grade::D
    }
}
