//! 対話セッションの状態とイベントハンドラ。
//!
//! ホスト側のイベントループ（ボタン操作や k の選択）は、ここにある各メソッドを
//! 直接呼び出す。点・重心・割り当てはすべて [`Session`] が所有する。

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::cluster::{self, Assignment, ClusterError};
use crate::generate::{generate_centroids, generate_points};
use crate::geometry::{Bounds, Point};
use crate::scene::Scene;

/// Where the current run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    Assigned,
    Updated,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("k must be between 1 and {max}, got {requested}")]
    InvalidK { requested: usize, max: usize },
    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

/// Result of a "move centroids" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No assignment covering every point exists yet; nothing happened.
    NotAssigned,
    /// The update step ran; `moved` centroids changed position.
    Updated { moved: usize },
}

/// セッションの固定パラメータ。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub bounds: Bounds,
    pub point_count: usize,
    pub initial_k: usize,
    pub max_k: usize,
}

impl SessionSettings {
    fn check_k(&self, k: usize) -> Result<(), SessionError> {
        if k == 0 || k > self.max_k {
            return Err(SessionError::InvalidK {
                requested: k,
                max: self.max_k,
            });
        }
        Ok(())
    }
}

pub struct Session<R> {
    settings: SessionSettings,
    k: usize,
    points: Vec<Point>,
    centroids: Vec<Point>,
    assignment: Option<Assignment>,
    phase: Phase,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// 初期状態を作る。点と重心を生成し、割り当ては空のまま。
    ///
    /// # Errors
    /// `initial_k` が `1..=max_k` の範囲外なら [`SessionError::InvalidK`] を返す。
    pub fn new(settings: SessionSettings, mut rng: R) -> Result<Self, SessionError> {
        settings.check_k(settings.initial_k)?;
        let points = generate_points(&mut rng, settings.point_count, &settings.bounds);
        let centroids = generate_centroids(&mut rng, settings.initial_k, &settings.bounds);
        info!(
            points = points.len(),
            k = settings.initial_k,
            "session initialized"
        );
        Ok(Self {
            settings,
            k: settings.initial_k,
            points,
            centroids,
            assignment: None,
            phase: Phase::Uninitialized,
            rng,
        })
    }

    /// 呼び出し側が用意した点と重心からセッションを作る。
    ///
    /// `centroids` が空の場合、最初の [`Session::assign`] で `initial_k` 個生成する。
    ///
    /// # Errors
    /// `initial_k` が範囲外、または `centroids` の個数が `1..=max_k` に収まらない場合。
    pub fn with_points(
        settings: SessionSettings,
        points: Vec<Point>,
        centroids: Vec<Point>,
        rng: R,
    ) -> Result<Self, SessionError> {
        settings.check_k(settings.initial_k)?;
        let k = if centroids.is_empty() {
            settings.initial_k
        } else {
            settings.check_k(centroids.len())?;
            centroids.len()
        };
        Ok(Self {
            settings,
            k,
            points,
            centroids,
            assignment: None,
            phase: Phase::Uninitialized,
            rng,
        })
    }

    /// k の変更。重心を作り直し、割り当てを破棄する。
    ///
    /// # Errors
    /// `k` が `1..=max_k` の範囲外なら [`SessionError::InvalidK`] を返し、状態は変えない。
    pub fn select_k(&mut self, k: usize) -> Result<(), SessionError> {
        self.settings.check_k(k)?;
        self.k = k;
        self.regenerate_centroids();
        info!(k, "cluster count changed");
        Ok(())
    }

    /// 割り当てステップ。重心がまだ無ければ先に生成する。
    ///
    /// # Errors
    /// 重心が空のまま割り当てを試みた場合のみ（通常は発生しない）。
    pub fn assign(&mut self) -> Result<&Assignment, SessionError> {
        if self.centroids.is_empty() {
            self.centroids = generate_centroids(&mut self.rng, self.k, &self.settings.bounds);
            debug!(k = self.k, "centroids generated on demand");
        }

        let assignment = cluster::assign(&self.points, &self.centroids)?;
        let inertia = cluster::inertia(&self.points, &assignment, &self.centroids)?;
        info!(
            points = self.points.len(),
            k = self.k,
            sizes = ?assignment.sizes(),
            inertia,
            "points assigned"
        );
        self.phase = Phase::Assigned;
        Ok(&*self.assignment.insert(assignment))
    }

    /// 更新ステップ。全点を覆う割り当てがある場合のみ重心を移動する。
    ///
    /// # Errors
    /// 割り当てと重心の整合性が崩れている場合に [`SessionError::Cluster`] を返す。
    pub fn move_centroids(&mut self) -> Result<MoveOutcome, SessionError> {
        let Some(assignment) = self
            .assignment
            .as_ref()
            .filter(|a| a.len() == self.points.len())
        else {
            debug!("move requested before assignment; ignoring");
            return Ok(MoveOutcome::NotAssigned);
        };

        let updated = cluster::update(&self.points, assignment, &self.centroids)?;
        let moved = updated
            .iter()
            .zip(&self.centroids)
            .filter(|(new, old)| new != old)
            .count();
        let inertia = cluster::inertia(&self.points, assignment, &updated)?;
        self.centroids = updated;
        self.phase = Phase::Updated;
        info!(moved, inertia, "centroids moved");
        Ok(MoveOutcome::Updated { moved })
    }

    /// 点と重心を作り直し、割り当てを破棄する。
    pub fn restart(&mut self) {
        self.points = generate_points(
            &mut self.rng,
            self.settings.point_count,
            &self.settings.bounds,
        );
        self.regenerate_centroids();
        info!(points = self.points.len(), k = self.k, "session restarted");
    }

    fn regenerate_centroids(&mut self) {
        self.centroids = generate_centroids(&mut self.rng, self.k, &self.settings.bounds);
        self.assignment = None;
        self.phase = Phase::Uninitialized;
    }
}

impl<R> Session<R> {
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    #[must_use]
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// 描画用スナップショット。
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::build(
            &self.settings.bounds,
            self.phase,
            self.k,
            &self.points,
            &self.centroids,
            self.assignment.as_ref(),
        )
    }
}
