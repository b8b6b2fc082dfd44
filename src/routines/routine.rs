use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("Failed to fetch balances from the node")]
    FetchFailed,
    #[error("Failed to write the export file")]
    ExportFailed,
}

#[async_trait::async_trait]
pub trait Routine {
    fn name(&self) -> &str;

    async fn run(&self) -> error_stack::Result<(), RoutineError>;
}
