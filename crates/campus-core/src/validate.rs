// ── Client-side input validation ──
//
// Runs before any network call: a payload that fails here never reaches
// the Request Executor, and the caller gets field-level messages instead
// of a server round trip. This is the one place errors are prevented
// rather than recovered.

use crate::error::CoreError;
use crate::requests::{
    AttendanceInput, NewBatch, NewCourse, NewEnrollment, NewExam, NewFee, NewMessage,
    NewStudent, NewTeacher, ResultInput,
};

fn err(field: &str, reason: &str) -> CoreError {
    CoreError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(err(field, "must not be empty"));
    }
    Ok(())
}

fn email(field: &str, value: &str) -> Result<(), CoreError> {
    require(field, value)?;
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
    if !valid {
        return Err(err(field, "must be a valid email address"));
    }
    Ok(())
}

fn phone(field: &str, value: &str) -> Result<(), CoreError> {
    require(field, value)?;
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(err(field, "must contain 7 to 15 digits"));
    }
    Ok(())
}

// ── Per-payload validators ──────────────────────────────────────────

pub fn new_student(input: &NewStudent) -> Result<(), CoreError> {
    require("firstName", &input.first_name)?;
    require("lastName", &input.last_name)?;
    email("email", &input.email)?;
    phone("phone", &input.phone)
}

pub fn new_teacher(input: &NewTeacher) -> Result<(), CoreError> {
    require("firstName", &input.first_name)?;
    require("lastName", &input.last_name)?;
    email("email", &input.email)?;
    phone("phone", &input.phone)
}

pub fn new_course(input: &NewCourse) -> Result<(), CoreError> {
    require("name", &input.name)?;
    require("code", &input.code)
}

pub fn new_batch(input: &NewBatch) -> Result<(), CoreError> {
    require("name", &input.name)?;
    if input.capacity == Some(0) {
        return Err(err("capacity", "must be at least 1"));
    }
    Ok(())
}

pub fn new_enrollment(input: &NewEnrollment) -> Result<(), CoreError> {
    if input.student_id.get() <= 0 {
        return Err(err("studentId", "must be a positive id"));
    }
    if input.batch_id.get() <= 0 {
        return Err(err("batchId", "must be a positive id"));
    }
    Ok(())
}

pub fn attendance_input(input: &AttendanceInput) -> Result<(), CoreError> {
    if input.student_id.get() <= 0 {
        return Err(err("studentId", "must be a positive id"));
    }
    if input.batch_id.get() <= 0 {
        return Err(err("batchId", "must be a positive id"));
    }
    Ok(())
}

pub fn new_fee(input: &NewFee) -> Result<(), CoreError> {
    if input.student_id.get() <= 0 {
        return Err(err("studentId", "must be a positive id"));
    }
    if input.amount <= 0.0 {
        return Err(err("amount", "must be greater than zero"));
    }
    Ok(())
}

pub fn new_exam(input: &NewExam) -> Result<(), CoreError> {
    require("name", &input.name)?;
    if input.max_marks == 0 {
        return Err(err("maxMarks", "must be at least 1"));
    }
    Ok(())
}

pub fn result_input(input: &ResultInput) -> Result<(), CoreError> {
    if input.marks < 0.0 {
        return Err(err("marks", "must not be negative"));
    }
    Ok(())
}

pub fn result_marks(marks: f64) -> Result<(), CoreError> {
    if marks < 0.0 {
        return Err(err("marks", "must not be negative"));
    }
    Ok(())
}

pub fn new_message(input: &NewMessage) -> Result<(), CoreError> {
    require("sender", &input.sender)?;
    require("recipient", &input.recipient)?;
    require("body", &input.body)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    fn student(email: &str, phone: &str) -> NewStudent {
        NewStudent {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: phone.into(),
            batch_id: None,
            joined_on: None,
        }
    }

    #[test]
    fn accepts_well_formed_student() {
        assert!(new_student(&student("ada@example.com", "5551234567")).is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["ada", "ada@", "@example.com", "ada@nodot"] {
            let e = new_student(&student(bad, "5551234567")).unwrap_err();
            assert!(e.is_validation(), "{bad} should fail validation");
        }
    }

    #[test]
    fn rejects_short_phone() {
        let e = new_student(&student("ada@example.com", "123")).unwrap_err();
        match e {
            CoreError::Validation { field, .. } => assert_eq!(field, "phone"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_amount_fee() {
        let input = NewFee {
            student_id: RecordId::new(1),
            amount: 0.0,
            due_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        };
        assert!(new_fee(&input).is_err());
    }

    #[test]
    fn validation_error_message_names_the_field() {
        let e = new_message(&NewMessage {
            sender: "admin".into(),
            recipient: String::new(),
            subject: None,
            body: "hello".into(),
        })
        .unwrap_err();
        insta::assert_snapshot!(
            e.to_string(),
            @"Validation failed for recipient: must not be empty"
        );
    }
}
