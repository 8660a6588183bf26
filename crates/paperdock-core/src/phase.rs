//! パイプラインの状態機械
//!
//! ビルドステージとランステージをまたぐライフサイクルを表現します。
//! Provisionerが `NotStarted → Provisioned` を、Orchestratorが
//! `Provisioned → Running → {Stopped, Crashed}` を所有します。

use serde::{Deserialize, Serialize};
use std::fmt;

/// パイプラインのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    NotStarted,
    Provisioned,
    Running,
    Stopped,
    Crashed,
}

impl PipelinePhase {
    /// 許可された遷移かどうかを判定
    ///
    /// 遷移は前方向のみ。失敗した遷移はフェーズを進めず、
    /// プロセス全体を非ゼロ終了させることで表現されます。
    pub fn can_transition_to(self, next: PipelinePhase) -> bool {
        use PipelinePhase::*;
        matches!(
            (self, next),
            (NotStarted, Provisioned) | (Provisioned, Running) | (Running, Stopped) | (Running, Crashed)
        )
    }

    /// 終端フェーズかどうか
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelinePhase::Stopped | PipelinePhase::Crashed)
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelinePhase::NotStarted => "not_started",
            PipelinePhase::Provisioned => "provisioned",
            PipelinePhase::Running => "running",
            PipelinePhase::Stopped => "stopped",
            PipelinePhase::Crashed => "crashed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        use PipelinePhase::*;
        assert!(NotStarted.can_transition_to(Provisioned));
        assert!(Provisioned.can_transition_to(Running));
        assert!(Running.can_transition_to(Stopped));
        assert!(Running.can_transition_to(Crashed));
    }

    #[test]
    fn test_rejected_transitions() {
        use PipelinePhase::*;
        // 未プロビジョニングのディレクトリに対して起動してはならない
        assert!(!NotStarted.can_transition_to(Running));
        assert!(!Provisioned.can_transition_to(Stopped));
        // 終端フェーズからの復帰はコンテナランタイムの仕事
        assert!(!Crashed.can_transition_to(Running));
        assert!(!Stopped.can_transition_to(Running));
    }

    #[test]
    fn test_terminal() {
        assert!(PipelinePhase::Stopped.is_terminal());
        assert!(PipelinePhase::Crashed.is_terminal());
        assert!(!PipelinePhase::Running.is_terminal());
    }
}
