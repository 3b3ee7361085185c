//! 课程与授课教师存储操作

use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::course_teachers::{
    ActiveModel as CourseTeacherActiveModel, Column as CourseTeacherColumn,
    Entity as CourseTeachers,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseTeacher},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    users::entities::User,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_code: Set(req.course_code),
            title: Set(req.title),
            description: Set(req.description),
            credits: Set(req.credits),
            semester: Set(req.semester.to_string()),
            year: Set(req.year),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "创建课程失败"))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程失败"))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_course_by_code_impl(&self, course_code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::CourseCode.eq(course_code))
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程失败"))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::CourseCode.contains(&escaped))
                    .add(Column::Title.contains(&escaped)),
            );
        }

        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.to_string()));
        }

        if let Some(year) = query.year {
            select = select.filter(Column::Year.eq(year));
        }

        // 教师视图：只列出任教课程
        if let Some(teacher_id) = query.teacher_id {
            let course_ids = self.list_teacher_course_ids(teacher_id).await?;
            select = select.filter(Column::Id.is_in(course_ids));
        }

        select = select
            .order_by_desc(Column::Year)
            .order_by_asc(Column::CourseCode);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| read_error(e, "查询课程总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| read_error(e, "查询课程页数失败"))?;
        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| read_error(e, "查询课程列表失败"))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(course_code) = update.course_code {
            model.course_code = Set(course_code);
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester.to_string());
        }
        if let Some(year) = update.year {
            model.year = Set(year);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "更新课程失败"))?;

        self.get_course_by_id_impl(id).await
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "删除课程失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 分配授课教师，重复分配返回 Conflict
    pub async fn assign_teacher_impl(
        &self,
        course_id: i64,
        teacher_id: i64,
    ) -> Result<CourseTeacher> {
        let model = CourseTeacherActiveModel {
            course_id: Set(course_id),
            teacher_id: Set(teacher_id),
            assigned_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "分配教师失败"))?;

        Ok(result.into_course_teacher())
    }

    pub async fn remove_teacher_impl(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        let result = CourseTeachers::delete_many()
            .filter(
                Condition::all()
                    .add(CourseTeacherColumn::CourseId.eq(course_id))
                    .add(CourseTeacherColumn::TeacherId.eq(teacher_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "移除教师失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_course_teachers_impl(&self, course_id: i64) -> Result<Vec<User>> {
        let teacher_ids: Vec<i64> = CourseTeachers::find()
            .select_only()
            .column(CourseTeacherColumn::TeacherId)
            .filter(CourseTeacherColumn::CourseId.eq(course_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询授课教师失败"))?;

        self.get_users_by_ids_impl(&teacher_ids).await
    }

    pub async fn is_course_teacher_impl(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        let count = CourseTeachers::find()
            .filter(
                Condition::all()
                    .add(CourseTeacherColumn::CourseId.eq(course_id))
                    .add(CourseTeacherColumn::TeacherId.eq(teacher_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| read_error(e, "查询授课关系失败"))?;

        Ok(count > 0)
    }

    async fn list_teacher_course_ids(&self, teacher_id: i64) -> Result<Vec<i64>> {
        CourseTeachers::find()
            .select_only()
            .column(CourseTeacherColumn::CourseId)
            .filter(CourseTeacherColumn::TeacherId.eq(teacher_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询任教课程失败"))
    }
}
