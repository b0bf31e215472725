use chrono::{Local, NaiveDate};

use crate::application::ports::SidewallRecognitionPort;
use crate::domain::age::AgeMeasurement;
use crate::domain::errors::DomainResult;

/// Código DOT tecleado por el usuario en lugar de leído del flanco.
#[derive(Debug, Clone)]
pub struct DotCodeSidewall {
    code: String,
    today: NaiveDate,
}

impl DotCodeSidewall {
    pub fn new(code: impl Into<String>) -> Self {
        Self::with_today(code, Local::now().date_naive())
    }

    pub fn with_today(code: impl Into<String>, today: NaiveDate) -> Self {
        Self { code: code.into(), today }
    }
}

impl SidewallRecognitionPort for DotCodeSidewall {
    fn recognize(&self, _sidewall_image: Option<&[u8]>) -> DomainResult<AgeMeasurement> {
        AgeMeasurement::from_dot_code(&self.code, self.today, 1.0)
    }
}
