// Typed endpoint wrappers over the generic executor.
//
// Every resource follows the same REST shape, so these are deliberately
// thin: list → GET collection, create → POST body, update → PUT partial
// body, remove → DELETE by id. Create and update bodies are supplied by
// the caller as any `Serialize` type; `campus-core` owns the payload
// structs.

use serde::Serialize;

use crate::Error;
use crate::client::ApiClient;
use crate::types::{
    AttendanceRecord, BatchRecord, CourseRecord, EnrollmentRecord, ExamRecord, FeeRecord,
    MessageRecord, MetricsRecord, ResultRecord, StudentRecord, TeacherRecord,
};

impl ApiClient {
    // ── Students ─────────────────────────────────────────────────────

    pub async fn list_students(&self) -> Result<Vec<StudentRecord>, Error> {
        self.get("api/students").await
    }

    pub async fn create_student<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<StudentRecord, Error> {
        self.post("api/students", body).await
    }

    pub async fn update_student<B: Serialize + Sync>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<StudentRecord, Error> {
        self.put(&format!("api/students/{id}"), body).await
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/students/{id}")).await
    }

    // ── Teachers ─────────────────────────────────────────────────────

    pub async fn list_teachers(&self) -> Result<Vec<TeacherRecord>, Error> {
        self.get("api/teachers").await
    }

    pub async fn create_teacher<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<TeacherRecord, Error> {
        self.post("api/teachers", body).await
    }

    pub async fn update_teacher<B: Serialize + Sync>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<TeacherRecord, Error> {
        self.put(&format!("api/teachers/{id}"), body).await
    }

    pub async fn delete_teacher(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/teachers/{id}")).await
    }

    // ── Courses ──────────────────────────────────────────────────────

    pub async fn list_courses(&self) -> Result<Vec<CourseRecord>, Error> {
        self.get("api/courses").await
    }

    pub async fn create_course<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<CourseRecord, Error> {
        self.post("api/courses", body).await
    }

    pub async fn update_course<B: Serialize + Sync>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<CourseRecord, Error> {
        self.put(&format!("api/courses/{id}"), body).await
    }

    pub async fn delete_course(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/courses/{id}")).await
    }

    // ── Batches ──────────────────────────────────────────────────────

    pub async fn list_batches(&self) -> Result<Vec<BatchRecord>, Error> {
        self.get("api/batches").await
    }

    pub async fn create_batch<B: Serialize + Sync>(&self, body: &B) -> Result<BatchRecord, Error> {
        self.post("api/batches", body).await
    }

    pub async fn update_batch<B: Serialize + Sync>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<BatchRecord, Error> {
        self.put(&format!("api/batches/{id}"), body).await
    }

    pub async fn delete_batch(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/batches/{id}")).await
    }

    // ── Enrollments ──────────────────────────────────────────────────

    pub async fn list_enrollments(&self) -> Result<Vec<EnrollmentRecord>, Error> {
        self.get("api/enrollments").await
    }

    pub async fn create_enrollment<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<EnrollmentRecord, Error> {
        self.post("api/enrollments", body).await
    }

    pub async fn delete_enrollment(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/enrollments/{id}")).await
    }

    // ── Attendance ───────────────────────────────────────────────────

    pub async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, Error> {
        self.get("api/attendance").await
    }

    pub async fn create_attendance<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<AttendanceRecord, Error> {
        self.post("api/attendance", body).await
    }

    pub async fn update_attendance<B: Serialize + Sync>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<AttendanceRecord, Error> {
        self.put(&format!("api/attendance/{id}"), body).await
    }

    // ── Fees ─────────────────────────────────────────────────────────

    pub async fn list_fees(&self) -> Result<Vec<FeeRecord>, Error> {
        self.get("api/fees").await
    }

    pub async fn create_fee<B: Serialize + Sync>(&self, body: &B) -> Result<FeeRecord, Error> {
        self.post("api/fees", body).await
    }

    pub async fn update_fee<B: Serialize + Sync>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<FeeRecord, Error> {
        self.put(&format!("api/fees/{id}"), body).await
    }

    // ── Exams ────────────────────────────────────────────────────────

    pub async fn list_exams(&self) -> Result<Vec<ExamRecord>, Error> {
        self.get("api/exams").await
    }

    pub async fn create_exam<B: Serialize + Sync>(&self, body: &B) -> Result<ExamRecord, Error> {
        self.post("api/exams", body).await
    }

    pub async fn delete_exam(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/exams/{id}")).await
    }

    // ── Exam results ─────────────────────────────────────────────────

    pub async fn list_results(&self) -> Result<Vec<ResultRecord>, Error> {
        self.get("api/results").await
    }

    pub async fn create_result<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<ResultRecord, Error> {
        self.post("api/results", body).await
    }

    pub async fn update_result<B: Serialize + Sync>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<ResultRecord, Error> {
        self.put(&format!("api/results/{id}"), body).await
    }

    // ── Messages ─────────────────────────────────────────────────────

    pub async fn list_messages(&self) -> Result<Vec<MessageRecord>, Error> {
        self.get("api/messages").await
    }

    pub async fn create_message<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<MessageRecord, Error> {
        self.post("api/messages", body).await
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/messages/{id}")).await
    }

    // ── Dashboard ────────────────────────────────────────────────────

    /// Precomputed summary metrics. Consumers cache this exactly like any
    /// collection resource.
    pub async fn dashboard_metrics(&self) -> Result<MetricsRecord, Error> {
        self.get("api/dashboard/metrics").await
    }
}
