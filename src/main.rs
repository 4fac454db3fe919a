use jigsaw::error::ServiceError;

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    jigsaw::app::run().await
}
