use crate::client::{Board, CategoryFilter, ClientError, HttpItemSource, ItemFilter};

/// Fetch the board from a running server and render the filtered view
pub async fn run_board(
    api_url: &str,
    category: CategoryFilter,
    search: &str,
) -> Result<String, ClientError> {
    let board = Board::new(HttpItemSource::new(api_url)?);
    board.refresh().await?;

    let filter = ItemFilter::new(category, search);
    tracing::debug!(
        total = board.items().len(),
        shown = board.view(&filter).len(),
        "Rendering board"
    );

    Ok(board.render(&filter))
}
