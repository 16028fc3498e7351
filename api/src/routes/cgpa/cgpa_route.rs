//! POST /api/cgpa: direct CGPA calculation from structured grades.

use axum::{Json, extract::rejection::JsonRejection};
use contextor::gpa::{compute_cgpa, format_cgpa};

use crate::{
    error_handler::{AppError, AppResult},
    routes::cgpa::cgpa_request::{CgpaRequest, CgpaResponse},
};

const INVALID_GRADES: &str = "Invalid grade data provided";

/// Handler: POST /api/cgpa
///
/// Any malformed body, empty list or zero total credits is a 400.
pub async fn cgpa(payload: Result<Json<CgpaRequest>, JsonRejection>) -> AppResult<Json<CgpaResponse>> {
    let Ok(Json(body)) = payload else {
        return Err(AppError::BadRequest(INVALID_GRADES.into()));
    };
    let cgpa = compute_cgpa(&body.grades).ok_or_else(|| AppError::BadRequest(INVALID_GRADES.into()))?;
    Ok(Json(CgpaResponse {
        cgpa: format_cgpa(cgpa),
    }))
}
