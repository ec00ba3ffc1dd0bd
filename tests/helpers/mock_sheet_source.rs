// ==========================================
// 内存假表格源
// ==========================================
// 按 URL 中的 sheet 参数路由响应；队列只剩最后一条时重复返回
// ==========================================

use async_trait::async_trait;
use latam_dashboard::importer::{FetchError, FetchResult, SheetSource};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub enum MockReply {
    Body(String),
    Status(u16),
    Transport(String),
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    pub fn delayed(delay: Duration, reply: MockReply) -> Self {
        MockReply::Delayed(delay, Box::new(reply))
    }
}

#[derive(Default)]
struct Inner {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    requests: Mutex<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct MockSheetSource {
    inner: Arc<Inner>,
}

impl MockSheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为指定工作表追加一条响应
    pub fn push(&self, sheet_name: &str, reply: MockReply) -> &Self {
        self.inner
            .replies
            .lock()
            .unwrap()
            .entry(sheet_name.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn push_body(&self, sheet_name: &str, body: impl Into<String>) -> &Self {
        self.push(sheet_name, MockReply::Body(body.into()))
    }

    /// 已收到的请求地址
    pub fn requests(&self) -> Vec<String> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }

    fn next_reply(&self, sheet_name: &str) -> Option<MockReply> {
        let mut replies = self.inner.replies.lock().unwrap();
        let queue = replies.get_mut(sheet_name)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

fn resolve(reply: MockReply) -> std::pin::Pin<Box<dyn std::future::Future<Output = FetchResult<String>> + Send>> {
    Box::pin(async move {
        match reply {
            MockReply::Body(body) => Ok(body),
            MockReply::Status(status) => Err(FetchError::http_status(status)),
            MockReply::Transport(message) => Err(FetchError::transport(message)),
            MockReply::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                resolve(*inner).await
            }
        }
    })
}

#[async_trait]
impl SheetSource for MockSheetSource {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        self.inner.requests.lock().unwrap().push(url.to_string());

        let sheet_name = Url::parse(url)
            .ok()
            .and_then(|u| {
                u.query_pairs()
                    .find(|(k, _)| k == "sheet")
                    .map(|(_, v)| v.into_owned())
            })
            .unwrap_or_default();

        match self.next_reply(&sheet_name) {
            Some(reply) => resolve(reply).await,
            None => Err(FetchError::transport(format!("no mock reply for sheet {}", sheet_name))),
        }
    }
}
