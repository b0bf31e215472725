//! Edad del neumático a partir del código DOT del flanco.
//!
//! El código DOT termina en cuatro dígitos `WWYY`: semana y año de
//! fabricación (formato posterior a 2000). La edad se calcula en meses
//! naturales completos desde el primer día de esa semana.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TireAgeStatus {
    New,
    Good,
    Aging,
    Old,
    Expired,
}

impl TireAgeStatus {
    pub fn from_months(months: u32) -> Self {
        match months {
            m if m < 36 => TireAgeStatus::New,
            m if m < 60 => TireAgeStatus::Good,
            m if m < 72 => TireAgeStatus::Aging,
            m if m < 120 => TireAgeStatus::Old,
            _ => TireAgeStatus::Expired,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeMeasurement {
    pub manufacture_week: u32,
    pub manufacture_year: i32,
    pub age_in_months: u32,
    pub confidence: f32,
}

impl AgeMeasurement {
    pub fn new(week: u32, year: i32, today: NaiveDate, confidence: f32) -> DomainResult<Self> {
        let made = manufacture_date(week, year)?;
        if made > today {
            return Err(DomainError::InvalidInput(format!(
                "fecha de fabricación futura: semana {week} de {year}"
            )));
        }
        Ok(Self {
            manufacture_week: week,
            manufacture_year: year,
            age_in_months: whole_months_between(made, today),
            confidence: if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 0.0 },
        })
    }

    pub fn from_dot_code(code: &str, today: NaiveDate, confidence: f32) -> DomainResult<Self> {
        let (week, year) = parse_dot_date(code)?;
        Self::new(week, year, today, confidence)
    }

    pub fn status(&self) -> TireAgeStatus {
        TireAgeStatus::from_months(self.age_in_months)
    }
}

/// Extrae (semana, año) de los dígitos finales del código DOT.
pub fn parse_dot_date(code: &str) -> DomainResult<(u32, i32)> {
    let digits: String = code
        .trim()
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    match digits.len() {
        0 => Err(DomainError::InvalidInput(format!("código DOT sin fecha: {code:?}"))),
        3 => Err(DomainError::InvalidInput(format!(
            "código DOT anterior a 2000 no soportado: {code:?}"
        ))),
        n if n < 3 => Err(DomainError::InvalidInput(format!("código DOT incompleto: {code:?}"))),
        n => {
            let wwyy = &digits[n - 4..];
            let week: u32 = wwyy[..2].parse().map_err(|_| DomainError::InvalidInput(code.into()))?;
            let yy: i32 = wwyy[2..].parse().map_err(|_| DomainError::InvalidInput(code.into()))?;
            if !(1..=52).contains(&week) {
                return Err(DomainError::InvalidInput(format!("semana DOT fuera de rango: {week}")));
            }
            Ok((week, 2000 + yy))
        }
    }
}

fn manufacture_date(week: u32, year: i32) -> DomainResult<NaiveDate> {
    if !(1..=52).contains(&week) {
        return Err(DomainError::InvalidInput(format!("semana fuera de rango: {week}")));
    }
    NaiveDate::from_yo_opt(year, (week - 1) * 7 + 1)
        .ok_or_else(|| DomainError::InvalidInput(format!("año inválido: {year}")))
}

fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_trailing_week_year() {
        assert_eq!(parse_dot_date("DOT U2LL LMLR 5107").unwrap(), (51, 2007));
        assert_eq!(parse_dot_date("dot xxxx 2319 ").unwrap(), (23, 2019));
        assert_eq!(parse_dot_date("LMLR0122").unwrap(), (1, 2022));
    }

    #[test]
    fn rejects_bad_codes() {
        assert!(parse_dot_date("DOT ABCD").is_err());
        assert!(parse_dot_date("DOT 519").is_err());
        assert!(parse_dot_date("DOT 5519").is_err());
        assert!(parse_dot_date("DOT 0019").is_err());
    }

    #[test]
    fn age_uses_calendar_months() {
        // semana 1 de 2020 -> 1 de enero de 2020
        let m = AgeMeasurement::new(1, 2020, date(2023, 1, 1), 1.0).unwrap();
        assert_eq!(m.age_in_months, 36);
        assert_eq!(m.status(), TireAgeStatus::Good);

        let m = AgeMeasurement::new(1, 2020, date(2022, 12, 31), 1.0).unwrap();
        assert_eq!(m.age_in_months, 35);
        assert_eq!(m.status(), TireAgeStatus::New);
    }

    #[test]
    fn late_week_maps_to_december() {
        // semana 52 -> día 358 -> 24 de diciembre
        let m = AgeMeasurement::new(52, 2021, date(2022, 1, 24), 1.0).unwrap();
        assert_eq!(m.age_in_months, 1);
    }

    #[test]
    fn future_manufacture_is_rejected() {
        assert!(AgeMeasurement::new(30, 2026, date(2026, 1, 1), 1.0).is_err());
    }

    #[test]
    fn status_breakpoints() {
        assert_eq!(TireAgeStatus::from_months(0), TireAgeStatus::New);
        assert_eq!(TireAgeStatus::from_months(59), TireAgeStatus::Good);
        assert_eq!(TireAgeStatus::from_months(60), TireAgeStatus::Aging);
        assert_eq!(TireAgeStatus::from_months(72), TireAgeStatus::Old);
        assert_eq!(TireAgeStatus::from_months(120), TireAgeStatus::Expired);
    }

    #[test]
    fn from_dot_code_end_to_end() {
        let m = AgeMeasurement::from_dot_code("DOT 4T 2314", date(2024, 6, 1), 0.8).unwrap();
        assert_eq!((m.manufacture_week, m.manufacture_year), (23, 2014));
        assert_eq!(m.status(), TireAgeStatus::Old);
    }
}
