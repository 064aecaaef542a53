// ── Portal facade ──
//
// The entry point consumers hold. Owns the HTTP client and the query
// cache, vends typed collection handles whose fetchers convert wire
// records into domain types, and exposes one validated method per
// mutation. Every mutation runs through the same protocol: validate
// client-side, call the API, and on success invalidate the entity's
// declared scope so subscribed views refetch.

use std::future::Future;
use std::sync::Arc;

use campus_api::ApiClient;

use crate::cache::{QueryCache, ResourceHandle};
use crate::config::PortalConfig;
use crate::convert;
use crate::error::CoreError;
use crate::key::{ResourceKey, keys};
use crate::model::{
    AttendanceRecord, AttendanceStatus, Batch, Course, DashboardMetrics, Enrollment, Exam,
    ExamResult, Fee, FeeStatus, Message, RecordId, Student, Teacher,
};
use crate::mutation::Mutation;
use crate::requests::{
    AttendanceInput, AttendanceUpdate, BatchUpdate, CourseUpdate, FeeUpdate, NewBatch,
    NewCourse, NewEnrollment, NewExam, NewFee, NewMessage, NewStudent, NewTeacher,
    ResultInput, ResultUpdate, StudentUpdate, TeacherUpdate,
};
use crate::validate;

/// Declared invalidation scope per entity.
///
/// Every mutation of an entity invalidates exactly this list, so a
/// forgotten key is a one-place fix instead of a per-call-site hunt.
/// Entities that feed the dashboard aggregate include its key.
mod scope {
    use crate::key::{ResourceKey, keys};

    pub(super) fn students() -> Vec<ResourceKey> {
        vec![keys::students(), keys::dashboard_metrics()]
    }

    pub(super) fn teachers() -> Vec<ResourceKey> {
        vec![keys::teachers(), keys::dashboard_metrics()]
    }

    pub(super) fn courses() -> Vec<ResourceKey> {
        vec![keys::courses(), keys::dashboard_metrics()]
    }

    pub(super) fn batches() -> Vec<ResourceKey> {
        vec![keys::batches(), keys::dashboard_metrics()]
    }

    pub(super) fn enrollments() -> Vec<ResourceKey> {
        // Enrollment moves students between batches, so both views and
        // the dashboard can change.
        vec![keys::enrollments(), keys::students(), keys::dashboard_metrics()]
    }

    pub(super) fn attendance() -> Vec<ResourceKey> {
        vec![keys::attendance(), keys::dashboard_metrics()]
    }

    pub(super) fn fees() -> Vec<ResourceKey> {
        vec![keys::fees(), keys::dashboard_metrics()]
    }

    pub(super) fn exams() -> Vec<ResourceKey> {
        vec![keys::exams()]
    }

    pub(super) fn results() -> Vec<ResourceKey> {
        vec![keys::results()]
    }

    pub(super) fn messages() -> Vec<ResourceKey> {
        vec![keys::messages()]
    }
}

/// Facade over the campus API and its query cache.
///
/// Cheaply cloneable; clones share the client and the cache.
#[derive(Clone)]
pub struct Portal {
    api: Arc<ApiClient>,
    cache: QueryCache,
}

impl Portal {
    /// Build a portal for the configured server. Does not touch the
    /// network; the first subscription does.
    pub fn new(config: &PortalConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.server_url.as_str(), &config.transport())?;
        Ok(Self::with_client(api))
    }

    /// Wrap an existing [`ApiClient`] (used by tests to point at mock
    /// servers).
    pub fn with_client(api: ApiClient) -> Self {
        Self {
            api: Arc::new(api),
            cache: QueryCache::new(),
        }
    }

    /// The shared query cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn mutation<I, O, F, Fut>(&self, scope: Vec<ResourceKey>, action: F) -> Mutation<I, O>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, CoreError>> + Send + 'static,
    {
        let mut mutation = Mutation::new(self.cache.clone(), action);
        for key in scope {
            mutation = mutation.invalidates(key);
        }
        mutation
    }

    // ── Collection resources ─────────────────────────────────────────

    pub fn students(&self) -> ResourceHandle<Vec<Student>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::students(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_students().await?;
                Ok(records.into_iter().map(convert::student).collect())
            }
        })
    }

    pub fn teachers(&self) -> ResourceHandle<Vec<Teacher>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::teachers(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_teachers().await?;
                Ok(records.into_iter().map(convert::teacher).collect())
            }
        })
    }

    pub fn courses(&self) -> ResourceHandle<Vec<Course>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::courses(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_courses().await?;
                Ok(records.into_iter().map(convert::course).collect())
            }
        })
    }

    pub fn batches(&self) -> ResourceHandle<Vec<Batch>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::batches(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_batches().await?;
                Ok(records.into_iter().map(convert::batch).collect())
            }
        })
    }

    pub fn enrollments(&self) -> ResourceHandle<Vec<Enrollment>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::enrollments(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_enrollments().await?;
                Ok(records.into_iter().map(convert::enrollment).collect())
            }
        })
    }

    pub fn attendance(&self) -> ResourceHandle<Vec<AttendanceRecord>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::attendance(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_attendance().await?;
                Ok(records.into_iter().map(convert::attendance).collect())
            }
        })
    }

    pub fn fees(&self) -> ResourceHandle<Vec<Fee>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::fees(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_fees().await?;
                Ok(records.into_iter().map(convert::fee).collect())
            }
        })
    }

    pub fn exams(&self) -> ResourceHandle<Vec<Exam>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::exams(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_exams().await?;
                Ok(records.into_iter().map(convert::exam).collect())
            }
        })
    }

    pub fn results(&self) -> ResourceHandle<Vec<ExamResult>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::results(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_results().await?;
                Ok(records.into_iter().map(convert::exam_result).collect())
            }
        })
    }

    pub fn messages(&self) -> ResourceHandle<Vec<Message>> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::messages(), move || {
            let api = Arc::clone(&api);
            async move {
                let records = api.list_messages().await?;
                Ok(records.into_iter().map(convert::message).collect())
            }
        })
    }

    pub fn dashboard_metrics(&self) -> ResourceHandle<DashboardMetrics> {
        let api = Arc::clone(&self.api);
        self.cache.resource(keys::dashboard_metrics(), move || {
            let api = Arc::clone(&api);
            async move { Ok(convert::metrics(api.dashboard_metrics().await?)) }
        })
    }

    // ── Student mutations ────────────────────────────────────────────

    pub async fn create_student(&self, input: NewStudent) -> Result<Student, CoreError> {
        validate::new_student(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::students(), move |body: NewStudent| {
            let api = Arc::clone(&api);
            async move { Ok(convert::student(api.create_student(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn update_student(
        &self,
        id: RecordId,
        update: StudentUpdate,
    ) -> Result<Student, CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(
            scope::students(),
            move |(id, update): (RecordId, StudentUpdate)| {
                let api = Arc::clone(&api);
                async move { Ok(convert::student(api.update_student(id.get(), &update).await?)) }
            },
        )
        .run((id, update))
        .await
    }

    pub async fn delete_student(&self, id: RecordId) -> Result<(), CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(scope::students(), move |id: RecordId| {
            let api = Arc::clone(&api);
            async move { Ok(api.delete_student(id.get()).await?) }
        })
        .run(id)
        .await
    }

    // ── Teacher mutations ────────────────────────────────────────────

    pub async fn create_teacher(&self, input: NewTeacher) -> Result<Teacher, CoreError> {
        validate::new_teacher(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::teachers(), move |body: NewTeacher| {
            let api = Arc::clone(&api);
            async move { Ok(convert::teacher(api.create_teacher(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn update_teacher(
        &self,
        id: RecordId,
        update: TeacherUpdate,
    ) -> Result<Teacher, CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(
            scope::teachers(),
            move |(id, update): (RecordId, TeacherUpdate)| {
                let api = Arc::clone(&api);
                async move { Ok(convert::teacher(api.update_teacher(id.get(), &update).await?)) }
            },
        )
        .run((id, update))
        .await
    }

    pub async fn delete_teacher(&self, id: RecordId) -> Result<(), CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(scope::teachers(), move |id: RecordId| {
            let api = Arc::clone(&api);
            async move { Ok(api.delete_teacher(id.get()).await?) }
        })
        .run(id)
        .await
    }

    // ── Course mutations ─────────────────────────────────────────────

    pub async fn create_course(&self, input: NewCourse) -> Result<Course, CoreError> {
        validate::new_course(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::courses(), move |body: NewCourse| {
            let api = Arc::clone(&api);
            async move { Ok(convert::course(api.create_course(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn update_course(
        &self,
        id: RecordId,
        update: CourseUpdate,
    ) -> Result<Course, CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(
            scope::courses(),
            move |(id, update): (RecordId, CourseUpdate)| {
                let api = Arc::clone(&api);
                async move { Ok(convert::course(api.update_course(id.get(), &update).await?)) }
            },
        )
        .run((id, update))
        .await
    }

    pub async fn delete_course(&self, id: RecordId) -> Result<(), CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(scope::courses(), move |id: RecordId| {
            let api = Arc::clone(&api);
            async move { Ok(api.delete_course(id.get()).await?) }
        })
        .run(id)
        .await
    }

    // ── Batch mutations ──────────────────────────────────────────────

    pub async fn create_batch(&self, input: NewBatch) -> Result<Batch, CoreError> {
        validate::new_batch(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::batches(), move |body: NewBatch| {
            let api = Arc::clone(&api);
            async move { Ok(convert::batch(api.create_batch(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn update_batch(
        &self,
        id: RecordId,
        update: BatchUpdate,
    ) -> Result<Batch, CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(
            scope::batches(),
            move |(id, update): (RecordId, BatchUpdate)| {
                let api = Arc::clone(&api);
                async move { Ok(convert::batch(api.update_batch(id.get(), &update).await?)) }
            },
        )
        .run((id, update))
        .await
    }

    pub async fn delete_batch(&self, id: RecordId) -> Result<(), CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(scope::batches(), move |id: RecordId| {
            let api = Arc::clone(&api);
            async move { Ok(api.delete_batch(id.get()).await?) }
        })
        .run(id)
        .await
    }

    // ── Enrollment mutations ─────────────────────────────────────────

    pub async fn enroll_student(&self, input: NewEnrollment) -> Result<Enrollment, CoreError> {
        validate::new_enrollment(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::enrollments(), move |body: NewEnrollment| {
            let api = Arc::clone(&api);
            async move { Ok(convert::enrollment(api.create_enrollment(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn withdraw_enrollment(&self, id: RecordId) -> Result<(), CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(scope::enrollments(), move |id: RecordId| {
            let api = Arc::clone(&api);
            async move { Ok(api.delete_enrollment(id.get()).await?) }
        })
        .run(id)
        .await
    }

    // ── Attendance mutations ─────────────────────────────────────────

    pub async fn mark_attendance(
        &self,
        input: AttendanceInput,
    ) -> Result<AttendanceRecord, CoreError> {
        validate::attendance_input(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::attendance(), move |body: AttendanceInput| {
            let api = Arc::clone(&api);
            async move { Ok(convert::attendance(api.create_attendance(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn set_attendance_status(
        &self,
        id: RecordId,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord, CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(
            scope::attendance(),
            move |(id, status): (RecordId, AttendanceStatus)| {
                let api = Arc::clone(&api);
                async move {
                    let body = AttendanceUpdate { status };
                    Ok(convert::attendance(
                        api.update_attendance(id.get(), &body).await?,
                    ))
                }
            },
        )
        .run((id, status))
        .await
    }

    // ── Fee mutations ────────────────────────────────────────────────

    pub async fn add_fee(&self, input: NewFee) -> Result<Fee, CoreError> {
        validate::new_fee(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::fees(), move |body: NewFee| {
            let api = Arc::clone(&api);
            async move { Ok(convert::fee(api.create_fee(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn update_fee(&self, id: RecordId, update: FeeUpdate) -> Result<Fee, CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(scope::fees(), move |(id, update): (RecordId, FeeUpdate)| {
            let api = Arc::clone(&api);
            async move { Ok(convert::fee(api.update_fee(id.get(), &update).await?)) }
        })
        .run((id, update))
        .await
    }

    /// Mark a fee paid as of `paid_on`.
    pub async fn record_fee_payment(
        &self,
        id: RecordId,
        paid_on: chrono::NaiveDate,
    ) -> Result<Fee, CoreError> {
        self.update_fee(
            id,
            FeeUpdate {
                status: Some(FeeStatus::Paid),
                paid_on: Some(paid_on),
            },
        )
        .await
    }

    // ── Exam mutations ───────────────────────────────────────────────

    pub async fn create_exam(&self, input: NewExam) -> Result<Exam, CoreError> {
        validate::new_exam(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::exams(), move |body: NewExam| {
            let api = Arc::clone(&api);
            async move { Ok(convert::exam(api.create_exam(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn delete_exam(&self, id: RecordId) -> Result<(), CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(scope::exams(), move |id: RecordId| {
            let api = Arc::clone(&api);
            async move { Ok(api.delete_exam(id.get()).await?) }
        })
        .run(id)
        .await
    }

    // ── Result mutations ─────────────────────────────────────────────

    pub async fn record_result(&self, input: ResultInput) -> Result<ExamResult, CoreError> {
        validate::result_input(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::results(), move |body: ResultInput| {
            let api = Arc::clone(&api);
            async move { Ok(convert::exam_result(api.create_result(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn update_result(&self, id: RecordId, marks: f64) -> Result<ExamResult, CoreError> {
        validate::result_marks(marks)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::results(), move |(id, marks): (RecordId, f64)| {
            let api = Arc::clone(&api);
            async move {
                let body = ResultUpdate { marks };
                Ok(convert::exam_result(api.update_result(id.get(), &body).await?))
            }
        })
        .run((id, marks))
        .await
    }

    // ── Message mutations ────────────────────────────────────────────

    pub async fn send_message(&self, input: NewMessage) -> Result<Message, CoreError> {
        validate::new_message(&input)?;
        let api = Arc::clone(&self.api);
        self.mutation(scope::messages(), move |body: NewMessage| {
            let api = Arc::clone(&api);
            async move { Ok(convert::message(api.create_message(&body).await?)) }
        })
        .run(input)
        .await
    }

    pub async fn delete_message(&self, id: RecordId) -> Result<(), CoreError> {
        let api = Arc::clone(&self.api);
        self.mutation(scope::messages(), move |id: RecordId| {
            let api = Arc::clone(&api);
            async move { Ok(api.delete_message(id.get()).await?) }
        })
        .run(id)
        .await
    }
}
