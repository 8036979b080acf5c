use aggregator_client::QuoteRequest;

/// Raw `/api/quote` query. Empty values count as missing.
#[derive(Debug, Default)]
pub struct QuoteParams {
    pub chain: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl QuoteParams {
    /// First value wins when a key repeats. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = QuoteParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "chain" => &mut params.chain,
                "from" => &mut params.from,
                "to" => &mut params.to,
                "amount" => &mut params.amount,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    pub fn into_request(self) -> Option<QuoteRequest> {
        Some(QuoteRequest { chain: present(self.chain)?, from: present(self.from)?, to: present(self.to)?, amount: present(self.amount)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(chain: &str, from: &str, to: &str, amount: &str) -> QuoteParams {
        QuoteParams { chain: Some(chain.into()), from: Some(from.into()), to: Some(to.into()), amount: Some(amount.into()) }
    }

    #[test]
    fn test_complete_params() {
        let request = params("1", "0xa", "0xb", "10").into_request().unwrap();
        assert_eq!(request.chain, "1");
        assert_eq!(request.amount, "10");
    }

    #[test]
    fn test_repeated_key_keeps_first() {
        let pairs = [("chain", "1"), ("chain", "10"), ("from", "0xa"), ("to", "0xb"), ("amount", "5"), ("extra", "x")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let request = QuoteParams::from_pairs(pairs).into_request().unwrap();
        assert_eq!(request.chain, "1");
        assert_eq!(request.amount, "5");

        let pairs = vec![("chain".to_string(), String::new()), ("chain".to_string(), "1".to_string())];
        assert!(QuoteParams::from_pairs(pairs).chain.as_deref() == Some(""));
    }

    #[test]
    fn test_empty_is_missing() {
        assert!(params("1", "0xa", "", "10").into_request().is_none());
        assert!(QuoteParams { amount: None, ..params("1", "0xa", "0xb", "10") }.into_request().is_none());
    }
}
