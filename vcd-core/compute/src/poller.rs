//! 任务轮询器
//!
//! 对服务端异步任务做有上界的阻塞等待。轮询间隔从基础周期几何增长到
//! 上限周期；这是轮询节奏，与请求级重试退避（vcd-client 的 retry）无关。

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use vcd_client::models::{Task, TaskStatus};
use vcd_client::Result;

use crate::api::TaskSource;

/// 轮询节奏
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// 起始轮询间隔
    pub period: Duration,

    /// 轮询间隔上限
    pub max_period: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(250),
            max_period: Duration::from_secs(5),
        }
    }
}

/// 任务轮询器
///
/// 每次等待都从远端重新拉取任务状态，本地不跨调用缓存。
pub struct TaskPoller<'a, A: TaskSource + ?Sized> {
    api: &'a A,
    policy: PollPolicy,
}

impl<'a, A: TaskSource + ?Sized> TaskPoller<'a, A> {
    pub fn new(api: &'a A, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    /// 等待任务到达终态或超时
    ///
    /// 返回值：
    /// - `Ok(true)` - 任务成功结束
    /// - `Ok(false)` - 任务失败/取消/中止，或在 `timeout` 内未结束；
    ///   超时是正常返回而不是错误
    /// - `Err(_)` - 轮询期间的传输/解析错误
    ///
    /// 最晚在 `timeout + 一个轮询间隔` 内返回。
    pub async fn await_completion(&self, task: &Task, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        let mut delay = self.policy.period;

        loop {
            let current = self.api.get_task(&task.href).await?;
            match current.status {
                TaskStatus::Success => {
                    debug!("任务 {} 成功结束", task.href);
                    return Ok(true);
                }
                status if status.is_terminal() => {
                    let detail = current
                        .error
                        .as_ref()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "无错误详情".to_string());
                    warn!("任务 {} 终止于 {:?}: {}", task.href, status, detail);
                    return Ok(false);
                }
                _ => {}
            }

            let now = Instant::now();
            if now >= deadline {
                warn!("等待任务 {} 超时 ({:?})", task.href, timeout);
                return Ok(false);
            }

            sleep(delay.min(deadline - now)).await;
            delay = (delay * 3 / 2).min(self.policy.max_period);
        }
    }
}
