use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::{provided, Task};
use crate::services::{next_id, JsonStore};

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<JsonStore<Task>>,
}

impl TaskService {
    pub fn new(tasks: Arc<JsonStore<Task>>) -> Self {
        Self { tasks }
    }

    pub async fn list(&self) -> AppResult<Vec<Task>> {
        self.tasks.load_all().await
    }

    pub async fn create(
        &self,
        titulo: Option<String>,
        descripcion: Option<String>,
    ) -> AppResult<Task> {
        let (titulo, descripcion) = match (provided(titulo), provided(descripcion)) {
            (Some(t), Some(d)) => (t, d),
            _ => return Err(AppError::MissingFields),
        };

        self.tasks
            .update(move |tasks| {
                let task = Task {
                    id: next_id(tasks.iter().map(|t| t.id)),
                    titulo,
                    descripcion,
                };
                tasks.push(task.clone());
                Ok(task)
            })
            .await
    }

    /// Overwrites only the fields that were supplied; blank values count as omitted.
    pub async fn update(
        &self,
        id: u64,
        titulo: Option<String>,
        descripcion: Option<String>,
    ) -> AppResult<Task> {
        let titulo = provided(titulo);
        let descripcion = provided(descripcion);

        self.tasks
            .update(move |tasks| {
                let task = tasks
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| AppError::NotFound(id.to_string()))?;

                if let Some(titulo) = titulo {
                    task.titulo = titulo;
                }
                if let Some(descripcion) = descripcion {
                    task.descripcion = descripcion;
                }
                Ok(task.clone())
            })
            .await
    }

    pub async fn delete(&self, id: u64) -> AppResult<()> {
        self.tasks
            .update(move |tasks| {
                let index = tasks
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or_else(|| AppError::NotFound(id.to_string()))?;
                tasks.remove(index);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (TempDir, TaskService) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path().join("tareas.json")));
        (dir, TaskService::new(store))
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    async fn seed(tasks: &TaskService) {
        tasks.create(some("Buy milk"), some("2%")).await.unwrap();
        tasks.create(some("Write spec"), some("core")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let (_dir, tasks) = service();
        assert!(tasks.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_ids_in_order() {
        let (_dir, tasks) = service();
        seed(&tasks).await;

        let listed = tasks.list().await.unwrap();
        assert_eq!(
            listed,
            vec![
                Task {
                    id: 1,
                    titulo: "Buy milk".into(),
                    descripcion: "2%".into()
                },
                Task {
                    id: 2,
                    titulo: "Write spec".into(),
                    descripcion: "core".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_create_after_delete_uses_max_plus_one() {
        let (_dir, tasks) = service();
        seed(&tasks).await;
        tasks.delete(1).await.unwrap();
        let task = tasks.create(some("Tercera"), some("x")).await.unwrap();
        assert_eq!(task.id, 3);
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let (_dir, tasks) = service();
        assert!(matches!(
            tasks.create(some("Solo titulo"), None).await,
            Err(AppError::MissingFields)
        ));
        assert!(matches!(
            tasks.create(some(""), some("desc")).await,
            Err(AppError::MissingFields)
        ));
        assert!(tasks.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_title() {
        let (_dir, tasks) = service();
        seed(&tasks).await;

        let updated = tasks.update(1, None, some("whole")).await.unwrap();
        assert_eq!(updated.titulo, "Buy milk");
        assert_eq!(updated.descripcion, "whole");

        let listed = tasks.list().await.unwrap();
        assert_eq!(listed[0], updated);
        assert_eq!(listed[1].descripcion, "core");
    }

    #[tokio::test]
    async fn test_update_missing_task() {
        let (_dir, tasks) = service();
        seed(&tasks).await;
        assert!(matches!(
            tasks.update(42, some("x"), None).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_task_leaves_store_unchanged() {
        let (_dir, tasks) = service();
        seed(&tasks).await;
        let before = tasks.list().await.unwrap();

        assert!(matches!(tasks.delete(999).await, Err(AppError::NotFound(_))));
        assert_eq!(tasks.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_removes_task() {
        let (_dir, tasks) = service();
        seed(&tasks).await;
        tasks.delete(1).await.unwrap();
        let ids: Vec<u64> = tasks.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_ids() {
        let (_dir, tasks) = service();

        let (a, b) = tokio::join!(
            tasks.create(some("A"), some("a")),
            tasks.create(some("B"), some("b")),
        );
        let mut ids = vec![a.unwrap().id, b.unwrap().id];
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);

        let mut handles = Vec::new();
        for i in 0..20 {
            let tasks = tasks.clone();
            handles.push(tokio::spawn(async move {
                tasks
                    .create(Some(format!("t{}", i)), some("d"))
                    .await
                    .unwrap()
                    .id
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (3..=22).collect::<Vec<u64>>());
        assert_eq!(tasks.list().await.unwrap().len(), 22);
    }
}
