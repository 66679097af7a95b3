use crate::domain::payment::{DateWindow, PagedResult, Payment};
use crate::error::GatewayError;
use crate::query::details::TransactionDetailFetcher;
use crate::remote::client::RemoteClient;
use crate::remote::nvp::{format_timestamp, NvpResponse};
use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};

const METHOD: &str = "TransactionSearch";
const DEFAULT_WINDOW_DAYS: i64 = 30;
const DETAIL_FETCH_CONCURRENCY: usize = 4;

pub struct TransactionSearch<'a> {
    pub remote: &'a dyn RemoteClient,
}

impl<'a> TransactionSearch<'a> {
    pub async fn search(&self, window: DateWindow) -> Result<PagedResult, GatewayError> {
        let (start, end) = resolve_window(window, Utc::now());
        let response = self
            .remote
            .send(
                METHOD,
                vec![
                    ("STARTDATE".to_string(), format_timestamp(start)),
                    ("ENDDATE".to_string(), format_timestamp(end)),
                ],
            )
            .await?;

        if !response.is_success() {
            return Err(response.into_rejection(METHOD));
        }

        let ids = payment_transaction_ids(&response);
        tracing::info!(matched = ids.len(), "transaction search returned payment rows");

        // One failed detail fetch fails the whole search; there is no
        // partial-result suppression.
        let fetcher = TransactionDetailFetcher {
            remote: self.remote,
        };
        let transactions: Vec<Payment> = stream::iter(ids)
            .map(|id| {
                let fetcher = &fetcher;
                async move { fetcher.fetch(&id).await }
            })
            .buffered(DETAIL_FETCH_CONCURRENCY)
            .try_collect()
            .await?;

        Ok(PagedResult {
            current_page: 1,
            results_in_this_page: transactions.len() as u32,
            total_pages: 1,
            transactions,
        })
    }
}

pub fn resolve_window(window: DateWindow, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = window.final_date.unwrap_or(now);
    let start = window
        .initial_date
        .unwrap_or(end - Duration::days(DEFAULT_WINDOW_DAYS));
    (start, end)
}

fn payment_transaction_ids(response: &NvpResponse) -> Vec<String> {
    let mut ids = Vec::new();
    for n in 0.. {
        let Some(id) = response.indexed("L_TRANSACTIONID", n) else {
            break;
        };
        let kind = response.indexed("L_TYPE", n).unwrap_or("");
        if kind.eq_ignore_ascii_case("payment") {
            ids.push(id.to_string());
        }
    }
    ids
}
