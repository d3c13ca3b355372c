// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Task repository.
//!
//! Tasks are soft-deleted: [`TaskRepository::soft_delete_task`] clears
//! `is_active` and leaves the row in place. Searches take a composed
//! [`Predicate`] and return one page plus the total match count.

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePool, Row};
use taskhub_core::{PageRequest, Predicate, Task, TaskId, TaskSortField};

use crate::error::{DbError, Result};
use crate::predicate_sql::{bind_values, lower_predicate_with, SubstringStrategy};
use crate::timestamp::{format_timestamp, parse_timestamp};

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, is_active, \
	user_id, created_at, updated_at";

#[async_trait]
pub trait TaskStore: Send + Sync {
	async fn create_task(&self, task: &Task) -> Result<()>;
	async fn get_task_by_id(&self, id: &TaskId) -> Result<Option<Task>>;
	async fn update_task(&self, task: &Task) -> Result<()>;
	async fn soft_delete_task(&self, id: &TaskId) -> Result<bool>;
	async fn find_tasks(
		&self,
		predicate: &Predicate,
		page: &PageRequest<TaskSortField>,
	) -> Result<(Vec<Task>, i64)>;
}

#[derive(sqlx::FromRow)]
struct TaskRow {
	id: String,
	title: String,
	description: Option<String>,
	status: String,
	priority: String,
	due_date: Option<String>,
	is_active: bool,
	user_id: String,
	created_at: String,
	updated_at: String,
}

impl TryFrom<TaskRow> for Task {
	type Error = DbError;

	fn try_from(row: TaskRow) -> Result<Self> {
		Ok(Task {
			id: row
				.id
				.parse()
				.map_err(|_| DbError::Internal(format!("Invalid task ID: {}", row.id)))?,
			title: row.title,
			description: row.description,
			status: row.status.parse().map_err(DbError::Internal)?,
			priority: row.priority.parse().map_err(DbError::Internal)?,
			due_date: row
				.due_date
				.as_deref()
				.map(|s| parse_timestamp(s, "due_date"))
				.transpose()?,
			is_active: row.is_active,
			owner_id: row
				.user_id
				.parse()
				.map_err(|_| DbError::Internal(format!("Invalid user ID: {}", row.user_id)))?,
			created_at: parse_timestamp(&row.created_at, "created_at")?,
			updated_at: parse_timestamp(&row.updated_at, "updated_at")?,
		})
	}
}

/// Column for a sort field. The match is the allowlist.
fn sort_column(field: TaskSortField) -> &'static str {
	match field {
		TaskSortField::Title => "title",
		TaskSortField::Status => "status",
		TaskSortField::Priority => "priority",
		TaskSortField::DueDate => "due_date",
		TaskSortField::CreatedAt => "created_at",
		TaskSortField::UpdatedAt => "updated_at",
	}
}

/// Repository for task database operations.
#[derive(Clone)]
pub struct TaskRepository {
	pool: SqlitePool,
	substring: SubstringStrategy,
}

impl TaskRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self {
			pool,
			substring: SubstringStrategy::default(),
		}
	}

	/// Use a different SQL form for free-text conditions.
	pub fn with_substring_strategy(mut self, strategy: SubstringStrategy) -> Self {
		self.substring = strategy;
		self
	}

	/// Insert a new task.
	///
	/// Title and description are also stored lower-cased for searching.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the owning user does not exist.
	#[tracing::instrument(skip(self, task), fields(task_id = %task.id, user_id = %task.owner_id))]
	pub async fn create_task(&self, task: &Task) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO tasks (id, title, description, title_lower, description_lower, status,
				priority, due_date, is_active, user_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(task.id.to_string())
		.bind(&task.title)
		.bind(&task.description)
		.bind(task.title.to_lowercase())
		.bind(task.description.as_deref().map(str::to_lowercase))
		.bind(task.status.as_str())
		.bind(task.priority.as_str())
		.bind(task.due_date.as_ref().map(format_timestamp))
		.bind(task.is_active)
		.bind(task.owner_id.to_string())
		.bind(format_timestamp(&task.created_at))
		.bind(format_timestamp(&task.updated_at))
		.execute(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
				DbError::NotFound(format!("User {}", task.owner_id))
			}
			sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
				DbError::Conflict(format!("Task {} already exists", task.id))
			}
			_ => DbError::Sqlx(e),
		})?;

		tracing::debug!(task_id = %task.id, "task created");
		Ok(())
	}

	/// Get a task by ID, including soft-deleted tasks.
	#[tracing::instrument(skip(self), fields(task_id = %id))]
	pub async fn get_task_by_id(&self, id: &TaskId) -> Result<Option<Task>> {
		let row = sqlx::query_as::<_, TaskRow>(&format!(
			"SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"
		))
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// Overwrite every mutable column of an existing task.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if no task has this ID.
	#[tracing::instrument(skip(self, task), fields(task_id = %task.id))]
	pub async fn update_task(&self, task: &Task) -> Result<()> {
		let result = sqlx::query(
			r#"
			UPDATE tasks
			SET title = ?, description = ?, title_lower = ?, description_lower = ?,
				status = ?, priority = ?, due_date = ?, is_active = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&task.title)
		.bind(&task.description)
		.bind(task.title.to_lowercase())
		.bind(task.description.as_deref().map(str::to_lowercase))
		.bind(task.status.as_str())
		.bind(task.priority.as_str())
		.bind(task.due_date.as_ref().map(format_timestamp))
		.bind(task.is_active)
		.bind(format_timestamp(&task.updated_at))
		.bind(task.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("Task {}", task.id)));
		}
		tracing::debug!(task_id = %task.id, "task updated");
		Ok(())
	}

	/// Mark a task inactive.
	///
	/// # Returns
	/// `true` if a task was found. Deleting an already inactive task still
	/// returns `true`.
	#[tracing::instrument(skip(self), fields(task_id = %id))]
	pub async fn soft_delete_task(&self, id: &TaskId) -> Result<bool> {
		let now = format_timestamp(&chrono::Utc::now());
		let result = sqlx::query(
			r#"
			UPDATE tasks
			SET is_active = 0, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(now)
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(task_id = %id, "task soft-deleted");
		}
		Ok(deleted)
	}

	/// Return one page of tasks matching `predicate` and the total match count.
	///
	/// Rows are ordered by the requested sort column, then by `id`, so pages
	/// never overlap while the data is unchanged.
	#[tracing::instrument(
		skip(self, predicate, page),
		fields(filter = %predicate, page = page.page, size = page.size, sort = %page.sort)
	)]
	pub async fn find_tasks(
		&self,
		predicate: &Predicate,
		page: &PageRequest<TaskSortField>,
	) -> Result<(Vec<Task>, i64)> {
		let filter = lower_predicate_with(predicate, self.substring);

		let count_sql = format!("SELECT COUNT(*) AS cnt FROM tasks WHERE {}", filter.sql);
		let count_row = bind_values!(sqlx::query(&count_sql), &filter.binds)
			.fetch_one(&self.pool)
			.await?;
		let total: i64 = count_row.get("cnt");

		let data_sql = format!(
			"SELECT {TASK_COLUMNS} FROM tasks WHERE {} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
			filter.sql,
			sort_column(page.sort.field),
			page.sort.direction.as_sql(),
		);
		let limit = i64::from(page.size);
		let offset = i64::try_from(page.offset())
			.map_err(|_| DbError::Internal("page offset out of range".to_string()))?;
		let rows = bind_values!(sqlx::query_as::<_, TaskRow>(&data_sql), &filter.binds)
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?;

		let tasks = rows
			.into_iter()
			.map(TryInto::try_into)
			.collect::<Result<Vec<Task>>>()?;
		tracing::debug!(total, returned = tasks.len(), "tasks found");
		Ok((tasks, total))
	}
}

#[async_trait]
impl TaskStore for TaskRepository {
	async fn create_task(&self, task: &Task) -> Result<()> {
		self.create_task(task).await
	}

	async fn get_task_by_id(&self, id: &TaskId) -> Result<Option<Task>> {
		self.get_task_by_id(id).await
	}

	async fn update_task(&self, task: &Task) -> Result<()> {
		self.update_task(task).await
	}

	async fn soft_delete_task(&self, id: &TaskId) -> Result<bool> {
		self.soft_delete_task(id).await
	}

	async fn find_tasks(
		&self,
		predicate: &Predicate,
		page: &PageRequest<TaskSortField>,
	) -> Result<(Vec<Task>, i64)> {
		self.find_tasks(predicate, page).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{create_test_pool, day, make_task, make_user};
	use crate::user::UserRepository;
	use proptest::prelude::*;
	use taskhub_core::{
		compose, evaluate, Sort, TaskFilterCriteria, TaskPriority, TaskStatus, UserId,
	};

	async fn setup() -> (TaskRepository, UserId) {
		let pool = create_test_pool().await;
		let user = make_user("alice");
		UserRepository::new(pool.clone()).create_user(&user).await.unwrap();
		(TaskRepository::new(pool), user.id)
	}

	fn by_created(direction_asc: bool, page: u32, size: u32) -> PageRequest<TaskSortField> {
		let sort = if direction_asc {
			Sort::asc(TaskSortField::CreatedAt)
		} else {
			Sort::desc(TaskSortField::CreatedAt)
		};
		PageRequest::new(page, size, sort)
	}

	async fn seed_scenario(repo: &TaskRepository, owner: UserId) -> Vec<Task> {
		let t1 = make_task(owner, "Deploy hotfix", TaskStatus::Completed, TaskPriority::High, day(1));
		let t2 = make_task(owner, "Write docs", TaskStatus::Pending, TaskPriority::Low, day(2));
		let t3 = make_task(owner, "Deploy pipeline", TaskStatus::InProgress, TaskPriority::High, day(3));
		for t in [&t1, &t2, &t3] {
			repo.create_task(t).await.unwrap();
		}
		vec![t1, t2, t3]
	}

	#[tokio::test]
	async fn create_and_get_round_trip() {
		let (repo, owner) = setup().await;
		let mut task = make_task(owner, "Ship it", TaskStatus::Pending, TaskPriority::Medium, day(5));
		task.description = Some("release notes".into());
		task.due_date = Some(day(9));
		repo.create_task(&task).await.unwrap();

		let loaded = repo.get_task_by_id(&task.id).await.unwrap().unwrap();
		assert_eq!(loaded, task);
	}

	#[tokio::test]
	async fn get_missing_is_none() {
		let (repo, _) = setup().await;
		assert!(repo.get_task_by_id(&TaskId::new()).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn create_for_unknown_user_is_not_found() {
		let (repo, _) = setup().await;
		let task = Task::new("Orphan", UserId::new());
		let err = repo.create_task(&task).await.unwrap_err();
		assert!(matches!(err, DbError::NotFound(_)));
	}

	#[tokio::test]
	async fn update_overwrites_fields() {
		let (repo, owner) = setup().await;
		let mut task = Task::new("Draft", owner);
		repo.create_task(&task).await.unwrap();

		task.title = "Final".into();
		task.status = TaskStatus::Completed;
		task.due_date = Some(day(20));
		repo.update_task(&task).await.unwrap();

		let loaded = repo.get_task_by_id(&task.id).await.unwrap().unwrap();
		assert_eq!(loaded.title, "Final");
		assert_eq!(loaded.status, TaskStatus::Completed);
		assert_eq!(loaded.due_date, Some(day(20)));
	}

	#[tokio::test]
	async fn update_missing_is_not_found() {
		let (repo, owner) = setup().await;
		let err = repo.update_task(&Task::new("Ghost", owner)).await.unwrap_err();
		assert!(matches!(err, DbError::NotFound(_)));
	}

	#[tokio::test]
	async fn soft_delete_keeps_row() {
		let (repo, owner) = setup().await;
		let task = Task::new("Temporary", owner);
		repo.create_task(&task).await.unwrap();

		assert!(repo.soft_delete_task(&task.id).await.unwrap());
		let loaded = repo.get_task_by_id(&task.id).await.unwrap().unwrap();
		assert!(!loaded.is_active);
		assert!(!repo.soft_delete_task(&TaskId::new()).await.unwrap());
	}

	#[tokio::test]
	async fn empty_predicate_returns_everything() {
		let (repo, owner) = setup().await;
		seed_scenario(&repo, owner).await;
		let (tasks, total) = repo.find_tasks(&Predicate::True, &by_created(true, 0, 10)).await.unwrap();
		assert_eq!(total, 3);
		assert_eq!(tasks.len(), 3);
	}

	#[tokio::test]
	async fn deploy_high_scenario_sorted() {
		let (repo, owner) = setup().await;
		seed_scenario(&repo, owner).await;
		let predicate = compose(&TaskFilterCriteria {
			search_text: Some("deploy".into()),
			priority: Some(TaskPriority::High),
			..Default::default()
		});

		let (asc, total) = repo.find_tasks(&predicate, &by_created(true, 0, 10)).await.unwrap();
		assert_eq!(total, 2);
		let titles: Vec<&str> = asc.iter().map(|t| t.title.as_str()).collect();
		assert_eq!(titles, vec!["Deploy hotfix", "Deploy pipeline"]);

		let (desc, _) = repo.find_tasks(&predicate, &by_created(false, 0, 10)).await.unwrap();
		let titles: Vec<&str> = desc.iter().map(|t| t.title.as_str()).collect();
		assert_eq!(titles, vec!["Deploy pipeline", "Deploy hotfix"]);
	}

	#[tokio::test]
	async fn search_matches_description_case_insensitively() {
		let (repo, owner) = setup().await;
		let mut task = Task::new("Quarterly review", owner);
		task.description = Some("Summarise the PROJECT status".into());
		repo.create_task(&task).await.unwrap();
		repo.create_task(&Task::new("Unrelated", owner)).await.unwrap();

		for needle in ["Project", "project"] {
			let predicate = compose(&TaskFilterCriteria {
				search_text: Some(needle.into()),
				..Default::default()
			});
			let (tasks, total) = repo.find_tasks(&predicate, &by_created(true, 0, 10)).await.unwrap();
			assert_eq!(total, 1);
			assert_eq!(tasks[0].id, task.id);
		}
	}

	#[tokio::test]
	async fn search_folds_non_ascii_case() {
		let (repo, owner) = setup().await;
		let mut task = Task::new("ÉLAN Überblick", owner);
		task.description = Some("STRASSE IN MÜNCHEN".into());
		repo.create_task(&task).await.unwrap();
		repo.create_task(&Task::new("elan without accent", owner)).await.unwrap();

		for strategy in [SubstringStrategy::Like, SubstringStrategy::Instr] {
			let repo = repo.clone().with_substring_strategy(strategy);
			for needle in ["élan", "ÜBERBLICK", "münchen"] {
				let predicate = compose(&TaskFilterCriteria {
					search_text: Some(needle.into()),
					..Default::default()
				});
				assert!(evaluate(&predicate, &task));
				let (tasks, total) = repo.find_tasks(&predicate, &by_created(true, 0, 10)).await.unwrap();
				assert_eq!(total, 1, "{strategy:?} {needle}");
				assert_eq!(tasks[0].id, task.id);
			}
		}
	}

	#[tokio::test]
	async fn update_refreshes_search_text() {
		let (repo, owner) = setup().await;
		let mut task = Task::new("Ärger", owner);
		repo.create_task(&task).await.unwrap();
		task.title = "Öffnung".into();
		task.description = Some("ÇA VA".into());
		repo.update_task(&task).await.unwrap();

		let search = |text: &str| {
			compose(&TaskFilterCriteria {
				search_text: Some(text.into()),
				..Default::default()
			})
		};
		let page = by_created(true, 0, 10);
		assert_eq!(repo.find_tasks(&search("ärger"), &page).await.unwrap().1, 0);
		assert_eq!(repo.find_tasks(&search("öffnung"), &page).await.unwrap().1, 1);
		assert_eq!(repo.find_tasks(&search("ça va"), &page).await.unwrap().1, 1);
	}

	#[tokio::test]
	async fn search_treats_wildcards_literally() {
		let (repo, owner) = setup().await;
		repo.create_task(&Task::new("50% done", owner)).await.unwrap();
		repo.create_task(&Task::new("500 done", owner)).await.unwrap();
		let predicate = compose(&TaskFilterCriteria {
			search_text: Some("50%".into()),
			..Default::default()
		});
		let (tasks, _) = repo.find_tasks(&predicate, &by_created(true, 0, 10)).await.unwrap();
		assert_eq!(tasks.len(), 1);
		assert_eq!(tasks[0].title, "50% done");
	}

	#[tokio::test]
	async fn instr_strategy_matches_like_strategy() {
		let (repo, owner) = setup().await;
		seed_scenario(&repo, owner).await;
		let instr = repo.clone().with_substring_strategy(SubstringStrategy::Instr);
		let predicate = compose(&TaskFilterCriteria {
			search_text: Some("DEPLOY".into()),
			..Default::default()
		});
		let page = by_created(true, 0, 10);
		let (like_hits, _) = repo.find_tasks(&predicate, &page).await.unwrap();
		let (instr_hits, _) = instr.find_tasks(&predicate, &page).await.unwrap();
		assert_eq!(like_hits, instr_hits);
	}

	#[tokio::test]
	async fn due_date_range_is_inclusive_and_skips_missing() {
		let (repo, owner) = setup().await;
		let mut on_from = Task::new("on from", owner);
		on_from.due_date = Some(day(10));
		let mut on_to = Task::new("on to", owner);
		on_to.due_date = Some(day(20));
		let mut after = Task::new("after", owner);
		after.due_date = Some(day(21));
		let undated = Task::new("undated", owner);
		for t in [&on_from, &on_to, &after, &undated] {
			repo.create_task(t).await.unwrap();
		}

		let predicate = compose(&TaskFilterCriteria {
			due_date_from: Some(day(10)),
			due_date_to: Some(day(20)),
			..Default::default()
		});
		let sort = PageRequest::new(0, 10, Sort::asc(TaskSortField::DueDate));
		let (tasks, total) = repo.find_tasks(&predicate, &sort).await.unwrap();
		assert_eq!(total, 2);
		assert_eq!(tasks[0].id, on_from.id);
		assert_eq!(tasks[1].id, on_to.id);

		let open_ended = compose(&TaskFilterCriteria {
			due_date_from: Some(day(10)),
			..Default::default()
		});
		let (_, total) = repo.find_tasks(&open_ended, &sort).await.unwrap();
		assert_eq!(total, 3);
	}

	#[tokio::test]
	async fn owner_and_active_filters() {
		let pool = create_test_pool().await;
		let users = UserRepository::new(pool.clone());
		let alice = make_user("alice");
		let bob = make_user("bob");
		users.create_user(&alice).await.unwrap();
		users.create_user(&bob).await.unwrap();
		let repo = TaskRepository::new(pool);

		let a1 = Task::new("a1", alice.id);
		let a2 = Task::new("a2", alice.id);
		let b1 = Task::new("b1", bob.id);
		for t in [&a1, &a2, &b1] {
			repo.create_task(t).await.unwrap();
		}
		repo.soft_delete_task(&a2.id).await.unwrap();

		let predicate = compose(&TaskFilterCriteria {
			owner_id: Some(alice.id),
			is_active: Some(true),
			..Default::default()
		});
		let (tasks, total) = repo.find_tasks(&predicate, &by_created(true, 0, 10)).await.unwrap();
		assert_eq!(total, 1);
		assert_eq!(tasks[0].id, a1.id);
	}

	#[tokio::test]
	async fn page_past_the_end_is_empty_with_total() {
		let (repo, owner) = setup().await;
		seed_scenario(&repo, owner).await;
		let (tasks, total) = repo.find_tasks(&Predicate::True, &by_created(true, 5, 2)).await.unwrap();
		assert!(tasks.is_empty());
		assert_eq!(total, 3);
	}

	const WORDS: [&str; 8] = [
		"Deploy", "docs", "Élan", "Überblick", "straße", "ÇA", "review", "HOTFIX",
	];

	prop_compose! {
		fn arb_task()(
			title_words in prop::collection::vec(0..WORDS.len(), 1..3),
			description_words in prop::option::of(prop::collection::vec(0..WORDS.len(), 1..3)),
			status in 0..TaskStatus::ALL.len(),
			priority in 0..TaskPriority::ALL.len(),
			owner in 0usize..2,
			is_active in any::<bool>(),
			due in prop::option::of(1u32..28),
			created in 1u32..28,
		) -> (usize, Task) {
			let join = |words: &[usize]| words.iter().map(|i| WORDS[*i]).collect::<Vec<_>>().join(" ");
			// The owner is filled in once the users exist.
			let mut task = Task::new(join(&title_words), UserId::new());
			task.description = description_words.map(|w| join(&w).to_uppercase());
			task.status = TaskStatus::ALL[status];
			task.priority = TaskPriority::ALL[priority];
			task.is_active = is_active;
			task.due_date = due.map(day);
			task.created_at = day(created);
			task.updated_at = day(created);
			(owner, task)
		}
	}

	prop_compose! {
		fn arb_criteria()(
			search in prop::option::of((0..WORDS.len(), any::<bool>())),
			status in prop::option::of(0..TaskStatus::ALL.len()),
			priority in prop::option::of(0..TaskPriority::ALL.len()),
			owner in prop::option::of(0usize..2),
			is_active in prop::option::of(any::<bool>()),
			due_from in prop::option::of(1u32..28),
			due_to in prop::option::of(1u32..28),
			created_from in prop::option::of(1u32..28),
			created_to in prop::option::of(1u32..28),
		) -> (Option<usize>, TaskFilterCriteria) {
			let criteria = TaskFilterCriteria {
				search_text: search.map(|(i, upper)| {
					if upper { WORDS[i].to_uppercase() } else { WORDS[i].to_lowercase() }
				}),
				status: status.map(|i| TaskStatus::ALL[i]),
				priority: priority.map(|i| TaskPriority::ALL[i]),
				owner_id: None,
				is_active,
				due_date_from: due_from.map(day),
				due_date_to: due_to.map(day),
				created_from: created_from.map(day),
				created_to: created_to.map(day),
			};
			(owner, criteria)
		}
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(32))]

		#[test]
		fn search_agrees_with_evaluate(
			generated in prop::collection::vec(arb_task(), 0..20),
			(owner, mut criteria) in arb_criteria(),
			instr in any::<bool>(),
		) {
			let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
			rt.block_on(async {
				let pool = create_test_pool().await;
				let users = UserRepository::new(pool.clone());
				let owners = [make_user("alice"), make_user("bob")];
				for user in &owners {
					users.create_user(user).await.unwrap();
				}
				let strategy = if instr { SubstringStrategy::Instr } else { SubstringStrategy::Like };
				let repo = TaskRepository::new(pool).with_substring_strategy(strategy);

				let mut all = Vec::new();
				for (index, mut task) in generated.into_iter() {
					task.owner_id = owners[index].id;
					repo.create_task(&task).await.unwrap();
					all.push(task);
				}
				criteria.owner_id = owner.map(|i| owners[i].id);

				let predicate = compose(&criteria);
				let mut expected: Vec<TaskId> = all
					.iter()
					.filter(|t| evaluate(&predicate, *t))
					.map(|t| t.id)
					.collect();
				expected.sort();

				let (tasks, total) = repo
					.find_tasks(&predicate, &by_created(true, 0, 100))
					.await
					.unwrap();
				let mut found: Vec<TaskId> = tasks.into_iter().map(|t| t.id).collect();
				found.sort();
				assert_eq!(total as usize, expected.len(), "{predicate}");
				assert_eq!(found, expected, "{predicate}");
			});
		}
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(16))]

		#[test]
		fn pages_partition_results(
			specs in prop::collection::vec((0usize..3, 0usize..4, 1u32..6), 1..25),
			size in 1u32..7,
			search_deploy in any::<bool>(),
		) {
			let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
			rt.block_on(async {
				let (repo, owner) = setup().await;
				let mut all = Vec::new();
				for (i, (priority, status, created)) in specs.iter().enumerate() {
					let title = if i % 2 == 0 { format!("Deploy {i}") } else { format!("Review {i}") };
					// Equal created_at values exercise the id tiebreaker.
					let task = make_task(
						owner,
						&title,
						TaskStatus::ALL[*status],
						TaskPriority::ALL[*priority],
						day(*created),
					);
					repo.create_task(&task).await.unwrap();
					all.push(task);
				}

				let criteria = TaskFilterCriteria {
					search_text: search_deploy.then(|| "deploy".to_string()),
					..Default::default()
				};
				let predicate = compose(&criteria);
				let expected = all.iter().filter(|t| evaluate(&predicate, *t)).count();

				let mut seen = Vec::new();
				let mut page = 0;
				loop {
					let (tasks, total) = repo
						.find_tasks(&predicate, &by_created(false, page, size))
						.await
						.unwrap();
					assert_eq!(total as usize, expected);
					if tasks.is_empty() {
						break;
					}
					seen.extend(tasks.into_iter().map(|t| t.id));
					page += 1;
				}
				let mut unique = seen.clone();
				unique.sort();
				unique.dedup();
				assert_eq!(seen.len(), expected);
				assert_eq!(unique.len(), expected);
			});
		}
	}
}
