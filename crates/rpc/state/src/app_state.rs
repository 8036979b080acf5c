use aggregator_client::QuoteClient;

#[derive(Clone)]
pub struct AppState {
    pub quote: QuoteClient,
}

impl AppState {
    pub fn new(quote: QuoteClient) -> Self {
        Self { quote }
    }
}
