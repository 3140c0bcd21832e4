//! Local stroke store.
//!
//! Per-participant state of the shared canvas: the strokes currently visible,
//! this participant's own undo/redo history and the stroke being drawn.
//!
//! The store is pure state. It never renders and never talks to the network;
//! every operation reports what changed so the caller can redraw and broadcast.
//! Views of different participants are only eventually consistent: a lost
//! message leaves them diverged, and nothing here reconciles them.

use sketchboard_shared::domain::{
    BrushWidth, Color, ParticipantId, Point, Segment, Stroke, StrokeId,
};

use crate::id::StrokeIdGenerator;

/// Entry of the local undo/redo history
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    /// A completed stroke drawn by the local participant
    Stroke(Stroke),
    /// A local clear, with the strokes that were visible at that moment
    Clear { snapshot: Vec<Stroke> },
}

/// What an undo or redo changed
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryStep {
    /// A replicated stroke was removed or restored
    Stroke(Stroke),
    /// A local clear was reverted or re-applied
    Clear,
}

/// Stroke still being drawn
#[derive(Debug, Clone, PartialEq)]
pub struct InProgressStroke {
    pub stroke_id: StrokeId,
    pub color: Color,
    pub width: BrushWidth,
    pub points: Vec<Point>,
}

pub struct StrokeStore {
    local_id: ParticipantId,
    id_generator: Box<dyn StrokeIdGenerator>,
    visible_strokes: Vec<Stroke>,
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    in_progress: Option<InProgressStroke>,
}

impl StrokeStore {
    pub fn new(local_id: ParticipantId, id_generator: Box<dyn StrokeIdGenerator>) -> Self {
        Self {
            local_id,
            id_generator,
            visible_strokes: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            in_progress: None,
        }
    }

    pub fn local_id(&self) -> &ParticipantId {
        &self.local_id
    }

    /// Completed strokes in insertion (arrival) order
    pub fn visible_strokes(&self) -> &[Stroke] {
        &self.visible_strokes
    }

    pub fn undo_stack(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[HistoryEntry] {
        &self.redo_stack
    }

    pub fn in_progress(&self) -> Option<&InProgressStroke> {
        self.in_progress.as_ref()
    }

    pub fn contains(&self, stroke_id: &StrokeId) -> bool {
        self.visible_strokes
            .iter()
            .any(|stroke| stroke.stroke_id() == stroke_id)
    }

    /// Copy of the visible strokes, for a future state exchange between peers.
    pub fn snapshot(&self) -> Vec<Stroke> {
        self.visible_strokes.clone()
    }

    /// Start a stroke at `origin`. A stroke already in progress is abandoned.
    pub fn begin_stroke(&mut self, origin: Point, color: Color, width: BrushWidth) -> StrokeId {
        let stroke_id = self.id_generator.next_id();
        if let Some(abandoned) = self.in_progress.take() {
            tracing::debug!("Abandoning unfinished stroke '{}'", abandoned.stroke_id);
        }
        self.in_progress = Some(InProgressStroke {
            stroke_id: stroke_id.clone(),
            color,
            width,
            points: vec![origin],
        });
        stroke_id
    }

    /// Append `point` to the stroke in progress.
    ///
    /// Returns the segment between the previous point and `point`, or `None`
    /// when nothing is being drawn.
    pub fn extend_stroke(&mut self, point: Point) -> Option<Segment> {
        let stroke = self.in_progress.as_mut()?;
        let from = *stroke.points.last()?;
        stroke.points.push(point);
        Some(Segment {
            owner_id: self.local_id.clone(),
            stroke_id: stroke.stroke_id.clone(),
            from,
            to: point,
            color: stroke.color.clone(),
            width: stroke.width,
        })
    }

    /// Freeze the stroke in progress and make it visible.
    ///
    /// Empties the redo stack. Returns the completed stroke, or `None` when
    /// nothing is being drawn.
    pub fn end_stroke(&mut self) -> Option<Stroke> {
        let in_progress = self.in_progress.take()?;
        let stroke = match Stroke::new(
            self.local_id.clone(),
            in_progress.stroke_id,
            in_progress.color,
            in_progress.width,
            in_progress.points,
        ) {
            Ok(stroke) => stroke,
            Err(e) => {
                tracing::warn!("Discarding unfinished stroke: {}", e);
                return None;
            }
        };
        self.visible_strokes.push(stroke.clone());
        self.undo_stack.push(HistoryEntry::Stroke(stroke.clone()));
        self.redo_stack.clear();
        Some(stroke)
    }

    /// Undo the most recent local entry. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<HistoryStep> {
        let entry = self.undo_stack.pop()?;
        let step = match &entry {
            HistoryEntry::Stroke(stroke) => {
                self.remove_visible(stroke.stroke_id());
                HistoryStep::Stroke(stroke.clone())
            }
            HistoryEntry::Clear { snapshot } => {
                let mut restored: Vec<Stroke> = snapshot
                    .iter()
                    .filter(|stroke| !self.contains(stroke.stroke_id()))
                    .cloned()
                    .collect();
                restored.append(&mut self.visible_strokes);
                self.visible_strokes = restored;
                HistoryStep::Clear
            }
        };
        self.redo_stack.push(entry);
        Some(step)
    }

    /// Redo the most recently undone entry. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<HistoryStep> {
        let entry = self.redo_stack.pop()?;
        match entry {
            HistoryEntry::Stroke(stroke) => {
                self.insert_if_absent(stroke.clone());
                self.undo_stack.push(HistoryEntry::Stroke(stroke.clone()));
                Some(HistoryStep::Stroke(stroke))
            }
            HistoryEntry::Clear { .. } => {
                let snapshot = std::mem::take(&mut self.visible_strokes);
                self.undo_stack.push(HistoryEntry::Clear { snapshot });
                Some(HistoryStep::Clear)
            }
        }
    }

    /// Hide every visible stroke for this participant only.
    ///
    /// Returns `false` when there was nothing to clear.
    pub fn clear_local(&mut self) -> bool {
        if self.visible_strokes.is_empty() {
            return false;
        }
        let snapshot = std::mem::take(&mut self.visible_strokes);
        self.undo_stack.push(HistoryEntry::Clear { snapshot });
        self.redo_stack.clear();
        true
    }

    /// Add a stroke completed by another participant.
    ///
    /// Strokes owned by the local participant are ignored. Returns whether the
    /// stroke was added.
    pub fn apply_remote_stroke_end(&mut self, stroke: Stroke) -> bool {
        if stroke.is_owned_by(&self.local_id) {
            return false;
        }
        self.insert_if_absent(stroke)
    }

    /// Remove `stroke_id` whoever undid it, from the visible strokes and from
    /// every clear snapshot, so undoing a clear cannot bring it back.
    ///
    /// Returns whether a visible stroke was removed.
    pub fn apply_remote_undo(&mut self, origin: &ParticipantId, stroke_id: &StrokeId) -> bool {
        self.forget_in_snapshots(stroke_id);
        let removed = self.remove_visible(stroke_id);
        if removed {
            tracing::debug!("'{}' undid stroke '{}'", origin, stroke_id);
        }
        removed
    }

    /// Restore a redone stroke unless it is already visible.
    pub fn apply_remote_redo(&mut self, origin: &ParticipantId, stroke: Stroke) -> bool {
        let stroke_id = stroke.stroke_id().clone();
        let inserted = self.insert_if_absent(stroke);
        if inserted {
            tracing::debug!("'{}' redid stroke '{}'", origin, stroke_id);
        }
        inserted
    }

    fn insert_if_absent(&mut self, stroke: Stroke) -> bool {
        if self.contains(stroke.stroke_id()) {
            return false;
        }
        self.visible_strokes.push(stroke);
        true
    }

    fn forget_in_snapshots(&mut self, stroke_id: &StrokeId) {
        for entry in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            if let HistoryEntry::Clear { snapshot } = entry {
                snapshot.retain(|stroke| stroke.stroke_id() != stroke_id);
            }
        }
    }

    fn remove_visible(&mut self, stroke_id: &StrokeId) -> bool {
        let before = self.visible_strokes.len();
        self.visible_strokes
            .retain(|stroke| stroke.stroke_id() != stroke_id);
        self.visible_strokes.len() != before
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::id::SequentialStrokeIdGenerator;

    fn participant(id: &str) -> ParticipantId {
        ParticipantId::new(id.to_string()).unwrap()
    }

    fn store_for(id: &str) -> StrokeStore {
        StrokeStore::new(
            participant(id),
            Box::new(SequentialStrokeIdGenerator::new(participant(id))),
        )
    }

    fn draw(store: &mut StrokeStore, points: &[(f64, f64)]) -> Stroke {
        let (x, y) = points[0];
        store.begin_stroke(Point::new(x, y), Color::black(), BrushWidth::default());
        for (x, y) in &points[1..] {
            store.extend_stroke(Point::new(*x, *y));
        }
        store.end_stroke().unwrap()
    }

    fn remote_stroke(owner: &str, id: &str) -> Stroke {
        Stroke::new(
            participant(owner),
            StrokeId::new(id.to_string()).unwrap(),
            Color::new("#f00").unwrap(),
            BrushWidth::new(3.0).unwrap(),
            vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
        )
        .unwrap()
    }

    fn ids(store: &StrokeStore) -> Vec<&str> {
        store
            .visible_strokes()
            .iter()
            .map(|s| s.stroke_id().as_str())
            .collect()
    }

    #[test]
    fn test_points_count_is_one_plus_extends_and_ids_are_unique() {
        // テスト項目: Begin→Extend*n→End で点数は 1+n になり、stroke ID はセッション内で一意
        // given (前提条件):
        let mut store = store_for("alice");

        // when (操作):
        let mut seen = HashSet::new();
        for extends in 0..6 {
            store.begin_stroke(Point::new(0.0, 0.0), Color::black(), BrushWidth::default());
            for i in 0..extends {
                store.extend_stroke(Point::new(i as f64, i as f64));
            }
            let stroke = store.end_stroke().unwrap();

            // then (期待する結果):
            assert_eq!(stroke.points().len(), 1 + extends);
            assert!(seen.insert(stroke.stroke_id().clone()));
        }
    }

    #[test]
    fn test_extend_yields_segment_between_last_two_points() {
        // テスト項目: ExtendStroke は直前の点と新しい点を結ぶ segment を返す
        // given (前提条件):
        let mut store = store_for("alice");
        let stroke_id =
            store.begin_stroke(Point::new(10.0, 10.0), Color::black(), BrushWidth::default());

        // when (操作):
        let segment = store.extend_stroke(Point::new(20.0, 20.0)).unwrap();

        // then (期待する結果):
        assert_eq!(segment.from, Point::new(10.0, 10.0));
        assert_eq!(segment.to, Point::new(20.0, 20.0));
        assert_eq!(segment.stroke_id, stroke_id);
        assert_eq!(segment.owner_id, participant("alice"));
    }

    #[test]
    fn test_extend_and_end_without_stroke_are_noops() {
        // テスト項目: 描画中のストロークがなければ Extend / End は何もしない
        // given (前提条件):
        let mut store = store_for("alice");

        // when (操作):
        let segment = store.extend_stroke(Point::new(1.0, 1.0));
        let stroke = store.end_stroke();

        // then (期待する結果):
        assert!(segment.is_none());
        assert!(stroke.is_none());
        assert!(store.visible_strokes().is_empty());
        assert!(store.undo_stack().is_empty());
    }

    #[test]
    fn test_begin_abandons_previous_in_progress_stroke() {
        // テスト項目: 描画中に BeginStroke すると前のストロークは破棄される
        // given (前提条件):
        let mut store = store_for("alice");
        store.begin_stroke(Point::new(0.0, 0.0), Color::black(), BrushWidth::default());
        store.extend_stroke(Point::new(5.0, 5.0));

        // when (操作):
        let second =
            store.begin_stroke(Point::new(9.0, 9.0), Color::black(), BrushWidth::default());
        let stroke = store.end_stroke().unwrap();

        // then (期待する結果):
        assert_eq!(stroke.stroke_id(), &second);
        assert_eq!(stroke.points(), &[Point::new(9.0, 9.0)]);
        assert_eq!(store.visible_strokes().len(), 1);
    }

    #[test]
    fn test_undo_moves_stroke_to_redo_stack() {
        // テスト項目: EndStroke 後の Undo はその stroke だけを非表示にし、redo スタックへ移す
        // given (前提条件):
        let mut store = store_for("alice");
        let first = draw(&mut store, &[(0.0, 0.0), (1.0, 1.0)]);
        let second = draw(&mut store, &[(5.0, 5.0), (6.0, 6.0)]);
        let redo_before = store.redo_stack().len();

        // when (操作):
        let step = store.undo().unwrap();

        // then (期待する結果):
        assert_eq!(step, HistoryStep::Stroke(second.clone()));
        assert_eq!(ids(&store), vec![first.stroke_id().as_str()]);
        assert_eq!(store.undo_stack(), &[HistoryEntry::Stroke(first)]);
        assert_eq!(store.redo_stack().len(), redo_before + 1);
        assert_eq!(store.redo_stack().last(), Some(&HistoryEntry::Stroke(second)));
    }

    #[test]
    fn test_undo_and_redo_on_empty_stacks_are_noops() {
        // テスト項目: スタックが空のとき Undo / Redo は何もしない
        // given (前提条件):
        let mut store = store_for("alice");

        // when (操作):
        let undo = store.undo();
        let redo = store.redo();

        // then (期待する結果):
        assert!(undo.is_none());
        assert!(redo.is_none());
    }

    #[test]
    fn test_redo_restores_identical_stroke() {
        // テスト項目: Undo 後の Redo で同じ stroke が同じ点・色・太さで復元される
        // given (前提条件):
        let mut store = store_for("alice");
        let stroke = draw(&mut store, &[(0.0, 0.0), (3.0, 4.0), (8.0, 1.0)]);
        store.undo();

        // when (操作):
        let step = store.redo().unwrap();

        // then (期待する結果):
        assert_eq!(step, HistoryStep::Stroke(stroke.clone()));
        assert_eq!(store.visible_strokes(), &[stroke.clone()]);
        assert_eq!(store.undo_stack(), &[HistoryEntry::Stroke(stroke)]);
        assert!(store.redo_stack().is_empty());
    }

    #[test]
    fn test_end_stroke_empties_redo_stack() {
        // テスト項目: EndStroke は redo スタックが空でなくても必ず空にする
        // given (前提条件):
        let mut store = store_for("alice");
        draw(&mut store, &[(0.0, 0.0)]);
        draw(&mut store, &[(1.0, 1.0)]);
        store.undo();
        store.undo();
        assert_eq!(store.redo_stack().len(), 2);

        // when (操作):
        draw(&mut store, &[(2.0, 2.0)]);

        // then (期待する結果):
        assert!(store.redo_stack().is_empty());
    }

    #[test]
    fn test_remote_stroke_end_from_self_is_ignored() {
        // テスト項目: 自分が所有者の stroke-end を受信しても無視される(エコー抑止)
        // given (前提条件):
        let mut store = store_for("alice");

        // when (操作):
        let added = store.apply_remote_stroke_end(remote_stroke("alice", "echo"));

        // then (期待する結果):
        assert!(!added);
        assert!(store.visible_strokes().is_empty());
    }

    #[test]
    fn test_remote_stroke_end_appends_in_arrival_order() {
        // テスト項目: 他者の stroke-end は到着順に追加され、同じ ID は重複しない
        // given (前提条件):
        let mut store = store_for("alice");
        let own = draw(&mut store, &[(0.0, 0.0)]);

        // when (操作):
        store.apply_remote_stroke_end(remote_stroke("bob", "b-1"));
        store.apply_remote_stroke_end(remote_stroke("carol", "c-1"));
        let duplicate = store.apply_remote_stroke_end(remote_stroke("bob", "b-1"));

        // then (期待する結果):
        assert!(!duplicate);
        assert_eq!(ids(&store), vec![own.stroke_id().as_str(), "b-1", "c-1"]);
        // Remote strokes never enter the local history
        assert_eq!(store.undo_stack().len(), 1);
    }

    #[test]
    fn test_remote_undo_removes_regardless_of_origin() {
        // テスト項目: リモートの undo は送信元に関係なく該当 ID を取り除き、二度目は何もしない
        // given (前提条件):
        let mut store = store_for("alice");
        store.apply_remote_stroke_end(remote_stroke("bob", "b-1"));
        let own = draw(&mut store, &[(0.0, 0.0)]);

        // when (操作):
        let bob_stroke = StrokeId::new("b-1".to_string()).unwrap();
        let removed = store.apply_remote_undo(&participant("bob"), &bob_stroke);
        let again = store.apply_remote_undo(&participant("bob"), &bob_stroke);
        store.undo();
        let echo = store.apply_remote_undo(&participant("alice"), own.stroke_id());

        // then (期待する結果):
        assert!(removed);
        assert!(!again);
        assert!(!echo);
        assert!(store.visible_strokes().is_empty());
    }

    #[test]
    fn test_remote_redo_is_idempotent() {
        // テスト項目: 同じ stroke の ApplyRemoteRedo を 2 回適用しても表示数は変わらない
        // given (前提条件):
        let mut store = store_for("alice");
        let stroke = remote_stroke("bob", "b-1");

        // when (操作):
        let first = store.apply_remote_redo(&participant("bob"), stroke.clone());
        let size_after_first = store.visible_strokes().len();
        let second = store.apply_remote_redo(&participant("bob"), stroke);

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(store.visible_strokes().len(), size_after_first);
    }

    #[test]
    fn test_clear_local_records_snapshot_and_empties_redo() {
        // テスト項目: ClearLocal は表示中の stroke のスナップショットを履歴に積み、表示と redo を空にする
        // given (前提条件):
        let mut store = store_for("alice");
        let own = draw(&mut store, &[(0.0, 0.0)]);
        draw(&mut store, &[(1.0, 1.0)]);
        store.undo();
        let remote = remote_stroke("bob", "b-1");
        store.apply_remote_stroke_end(remote.clone());

        // when (操作):
        let cleared = store.clear_local();

        // then (期待する結果):
        assert!(cleared);
        assert!(store.visible_strokes().is_empty());
        assert!(store.redo_stack().is_empty());
        assert_eq!(
            store.undo_stack().last(),
            Some(&HistoryEntry::Clear {
                snapshot: vec![own, remote]
            })
        );
    }

    #[test]
    fn test_clear_local_with_nothing_visible_is_noop() {
        // テスト項目: 表示中の stroke がなければ ClearLocal は何もしない
        // given (前提条件):
        let mut store = store_for("alice");

        // when (操作):
        let cleared = store.clear_local();

        // then (期待する結果):
        assert!(!cleared);
        assert!(store.undo_stack().is_empty());
    }

    #[test]
    fn test_undo_and_redo_of_clear() {
        // テスト項目: clear の Undo でスナップショットが復元され、Redo で再び消える
        // given (前提条件):
        let mut store = store_for("alice");
        let own = draw(&mut store, &[(0.0, 0.0)]);
        store.clear_local();
        let late = remote_stroke("bob", "b-late");
        store.apply_remote_stroke_end(late.clone());

        // when (操作):
        let undone = store.undo();
        let visible_after_undo = store.snapshot();
        let redone = store.redo();

        // then (期待する結果):
        assert_eq!(undone, Some(HistoryStep::Clear));
        assert_eq!(visible_after_undo, vec![own.clone(), late.clone()]);
        assert_eq!(redone, Some(HistoryStep::Clear));
        assert!(store.visible_strokes().is_empty());
        assert_eq!(
            store.undo_stack().last(),
            Some(&HistoryEntry::Clear {
                snapshot: vec![own, late]
            })
        );
    }

    #[test]
    fn test_undo_of_clear_does_not_restore_remotely_undone_stroke() {
        // テスト項目: clear 後に持ち主が undo した stroke は、clear の Undo で復活しない
        // given (前提条件):
        let mut store = store_for("alice");
        store.apply_remote_stroke_end(remote_stroke("bob", "b-1"));
        store.apply_remote_stroke_end(remote_stroke("carol", "c-1"));
        store.clear_local();

        // when (操作):
        let removed = store.apply_remote_undo(
            &participant("bob"),
            &StrokeId::new("b-1".to_string()).unwrap(),
        );
        store.undo();

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(ids(&store), vec!["c-1"]);
        assert_eq!(
            store.redo_stack(),
            &[HistoryEntry::Clear {
                snapshot: vec![remote_stroke("carol", "c-1")]
            }]
        );
    }

    #[test]
    fn test_remote_undo_reaches_clear_on_redo_stack() {
        // テスト項目: Undo 済みの clear (redo スタック上) のスナップショットからもリモート undo した stroke が除かれる
        // given (前提条件):
        let mut store = store_for("alice");
        store.apply_remote_stroke_end(remote_stroke("bob", "b-1"));
        store.clear_local();
        store.undo();

        // when (操作):
        let removed = store.apply_remote_undo(
            &participant("bob"),
            &StrokeId::new("b-1".to_string()).unwrap(),
        );

        // then (期待する結果):
        assert!(removed);
        assert!(store.visible_strokes().is_empty());
        assert_eq!(
            store.redo_stack(),
            &[HistoryEntry::Clear {
                snapshot: Vec::new()
            }]
        );
    }
}
