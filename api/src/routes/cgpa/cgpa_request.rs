use contextor::gpa::GradeRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CgpaRequest {
    pub grades: Vec<GradeRecord>,
}

#[derive(Debug, Serialize)]
pub struct CgpaResponse {
    /// Two-decimal string, e.g. `"3.60"`.
    pub cgpa: String,
}
