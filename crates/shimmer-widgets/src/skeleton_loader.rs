//! Skeleton loader widget.
//!
//! A placeholder box that runs a shimmering gradient sweep while real
//! content is loading. The shimmer starts when the widget attaches to the
//! visible tree and stops when it detaches; the host drives time by
//! calling [`SkeletonLoader::advance`] from its ticker.

use crate::sweep::{SweepConfig, SweepLoop};
use shimmer_core::{
    widget::LayoutResult, AttachSession, AttachState, BandOffsets, Canvas, Color, Constraints,
    DiagnosticSink, LinearGradient, Rect, SessionCounter, SessionId, Size, StderrSink, TypeId,
    Widget,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Called after a configuration property changes, with the property name.
type ChangeHook = Box<dyn FnMut(&'static str) + Send + Sync>;

/// Skeleton loader widget.
pub struct SkeletonLoader {
    /// Sweep duration multiplier; one sweep takes `1000 * speed` ms
    speed: f64,
    /// Pause between sweeps in seconds
    delay_seconds: f64,
    /// Panel color behind the shimmer
    background_color: Color,
    /// Highlight color at the band center
    wave_color: Color,
    /// Minimum width
    min_width: f32,
    /// Minimum height
    min_height: f32,
    /// Corner radius
    corner_radius: f32,
    /// Attach/detach state
    state: AttachState,
    /// Issues a fresh session per attach
    sessions: SessionCounter,
    /// Live session, present only while attached
    session: Option<AttachSession>,
    /// The sweep/delay/stop state machine
    sweep: SweepLoop,
    /// The three-stop shimmer brush the sweep writes into
    brush: LinearGradient,
    /// Count of band-offset writes delivered to the brush
    stop_writes: u64,
    /// Bumped on every configuration change
    revision: u64,
    /// Optional property-change hook
    on_change: Option<ChangeHook>,
    /// Sink for lifecycle-ordering diagnostics
    sink: Arc<dyn DiagnosticSink>,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    /// Current layout bounds
    bounds: Rect,
}

impl Default for SkeletonLoader {
    fn default() -> Self {
        let background_color = Color::from_rgb8(60, 60, 60);
        let wave_color = Color::from_rgb8(70, 70, 70);
        Self {
            speed: 1.0,
            delay_seconds: 1.0,
            background_color,
            wave_color,
            min_width: 100.0,
            min_height: 20.0,
            corner_radius: 4.0,
            state: AttachState::Idle,
            sessions: SessionCounter::new(),
            session: None,
            sweep: SweepLoop::new(),
            brush: LinearGradient::shimmer(background_color, wave_color),
            stop_writes: 0,
            revision: 0,
            on_change: None,
            sink: Arc::new(StderrSink),
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }
}

impl SkeletonLoader {
    /// Create a new skeleton loader with default styling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep speed multiplier. One sweep takes `1000 * speed` ms.
    #[must_use]
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Set the pause between sweeps, in seconds.
    #[must_use]
    pub fn delay_seconds(mut self, delay: f64) -> Self {
        self.delay_seconds = delay;
        self
    }

    /// Set the panel color behind the shimmer.
    #[must_use]
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self.rebuild_brush();
        self
    }

    /// Set the highlight color at the band center.
    #[must_use]
    pub fn wave_color(mut self, color: Color) -> Self {
        self.wave_color = color;
        self.rebuild_brush();
        self
    }

    /// Set the minimum width.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(0.0);
        self
    }

    /// Set the minimum height.
    #[must_use]
    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = height.max(0.0);
        self
    }

    /// Set the corner radius.
    #[must_use]
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Route diagnostics to a custom sink.
    #[must_use]
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Install a hook called with the property name after each change.
    #[must_use]
    pub fn on_change(mut self, hook: impl FnMut(&'static str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(hook));
        self
    }

    /// Set the sweep speed directly (mutable).
    ///
    /// An in-flight sweep keeps the duration it started with; the new
    /// speed applies from the next sweep.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.notify("speed");
    }

    /// Set the inter-sweep delay directly (mutable). Applies from the
    /// next sweep completion.
    pub fn set_delay_seconds(&mut self, delay: f64) {
        self.delay_seconds = delay;
        self.notify("delay_seconds");
    }

    /// Set the panel color directly (mutable).
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
        self.rebuild_brush();
        self.notify("background_color");
    }

    /// Set the highlight color directly (mutable).
    pub fn set_wave_color(&mut self, color: Color) {
        self.wave_color = color;
        self.rebuild_brush();
        self.notify("wave_color");
    }

    /// Get the sweep speed multiplier.
    #[must_use]
    pub fn get_speed(&self) -> f64 {
        self.speed
    }

    /// Get the inter-sweep delay in seconds.
    #[must_use]
    pub fn get_delay_seconds(&self) -> f64 {
        self.delay_seconds
    }

    /// Get the panel color.
    #[must_use]
    pub fn get_background_color(&self) -> Color {
        self.background_color
    }

    /// Get the highlight color.
    #[must_use]
    pub fn get_wave_color(&self) -> Color {
        self.wave_color
    }

    /// Get the minimum width.
    #[must_use]
    pub fn get_min_width(&self) -> f32 {
        self.min_width
    }

    /// Get the minimum height.
    #[must_use]
    pub fn get_min_height(&self) -> f32 {
        self.min_height
    }

    /// Get the corner radius.
    #[must_use]
    pub fn get_corner_radius(&self) -> f32 {
        self.corner_radius
    }

    /// Enter the visible tree and start shimmering.
    ///
    /// Begins a fresh session, resets the band to the start position and
    /// starts the sweep loop. Attaching while already attached restarts
    /// cleanly under a new session; the superseded loop stops itself.
    /// This never panics.
    pub fn attach(&mut self) {
        let session = self.sessions.begin();
        self.rebuild_brush();
        self.sweep
            .start(Some(&session), &self.sweep_config(), self.sink.as_ref());
        self.session = Some(session);
        self.state = AttachState::Attached;
    }

    /// Leave the visible tree and stop shimmering.
    ///
    /// Cancels the session token (covering an in-flight delay as well)
    /// and force-stops the sweep animation. Idempotent.
    pub fn detach(&mut self) {
        if let Some(session) = &self.session {
            session.token.cancel();
        }
        self.sweep.abort();
        self.session = None;
        self.state = AttachState::Idle;
    }

    /// Advance the shimmer by a time slice from the host ticker.
    ///
    /// Safe to call in any state; when detached, nothing happens.
    pub fn advance(&mut self, dt: Duration) {
        let current = self.session.as_ref().map(|s| s.id);
        let config = SweepConfig {
            speed: self.speed,
            delay_seconds: self.delay_seconds,
        };
        let brush = &mut self.brush;
        let stop_writes = &mut self.stop_writes;
        self.sweep.advance(dt, current, &config, |offsets| {
            brush.set_band_offsets(offsets);
            *stop_writes += 1;
        });
    }

    /// Whether the widget is attached to the visible tree.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.is_attached()
    }

    /// Whether a sweep is actively ticking.
    #[must_use]
    pub fn is_sweeping(&self) -> bool {
        self.sweep.is_sweeping()
    }

    /// Whether the shimmer is pausing between sweeps.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.sweep.is_delaying()
    }

    /// Whether any shimmer work remains scheduled.
    #[must_use]
    pub fn has_scheduled_work(&self) -> bool {
        self.sweep.has_scheduled_work()
    }

    /// Current band offsets of the shimmer brush.
    #[must_use]
    pub fn band_offsets(&self) -> BandOffsets {
        self.brush.band_offsets().unwrap_or(BandOffsets::at(0.0))
    }

    /// Total count of band-offset writes delivered to the brush.
    #[must_use]
    pub fn stop_write_count(&self) -> u64 {
        self.stop_writes
    }

    /// Configuration revision, bumped on every property change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Id of the live attach session, if any.
    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            speed: self.speed,
            delay_seconds: self.delay_seconds,
        }
    }

    fn rebuild_brush(&mut self) {
        self.brush = LinearGradient::shimmer(self.background_color, self.wave_color);
    }

    fn notify(&mut self, property: &'static str) {
        self.revision += 1;
        if let Some(hook) = &mut self.on_change {
            hook(property);
        }
    }
}

impl Widget for SkeletonLoader {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(self.min_width, self.min_height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        // Panel first, shimmer band over it.
        if self.corner_radius > 0.0 {
            canvas.fill_rounded_rect(self.bounds, self.corner_radius, self.background_color);
        } else {
            canvas.fill_rect(self.bounds, self.background_color);
        }
        canvas.fill_gradient(self.bounds, self.corner_radius, &self.brush);
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl fmt::Debug for SkeletonLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkeletonLoader")
            .field("speed", &self.speed)
            .field("delay_seconds", &self.delay_seconds)
            .field("background_color", &self.background_color)
            .field("wave_color", &self.wave_color)
            .field("state", &self.state)
            .field("sweep", &self.sweep)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shimmer_core::{DrawCommand, MemorySink, RecordingCanvas, TICK_INTERVAL};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn ticks(n: u32) -> Duration {
        TICK_INTERVAL * n
    }

    // 63 ticks cover the default 1000 ms sweep (62 * 16 = 992, 63rd saturates).
    const FULL_SWEEP_TICKS: u32 = 63;

    // ===== Construction Tests =====

    #[test]
    fn test_skeleton_loader_defaults() {
        let sk = SkeletonLoader::new();
        assert_eq!(sk.get_speed(), 1.0);
        assert_eq!(sk.get_delay_seconds(), 1.0);
        assert_eq!(sk.get_background_color(), Color::from_rgb8(60, 60, 60));
        assert_eq!(sk.get_wave_color(), Color::from_rgb8(70, 70, 70));
        assert!(!sk.is_attached());
        assert_eq!(sk.stop_write_count(), 0);
    }

    #[test]
    fn test_skeleton_loader_builder() {
        let sk = SkeletonLoader::new()
            .speed(0.5)
            .delay_seconds(2.0)
            .background_color(Color::BLACK)
            .wave_color(Color::WHITE)
            .min_width(200.0)
            .min_height(16.0)
            .corner_radius(8.0)
            .accessible_name("Loading placeholder")
            .test_id("card-skeleton");

        assert_eq!(sk.get_speed(), 0.5);
        assert_eq!(sk.get_delay_seconds(), 2.0);
        assert_eq!(sk.get_background_color(), Color::BLACK);
        assert_eq!(sk.get_wave_color(), Color::WHITE);
        assert_eq!(sk.get_min_width(), 200.0);
        assert_eq!(sk.get_min_height(), 16.0);
        assert_eq!(sk.get_corner_radius(), 8.0);
        assert_eq!(Widget::accessible_name(&sk), Some("Loading placeholder"));
        assert_eq!(Widget::test_id(&sk), Some("card-skeleton"));
    }

    #[test]
    fn test_builder_colors_rebuild_brush() {
        let sk = SkeletonLoader::new()
            .background_color(Color::BLACK)
            .wave_color(Color::WHITE);
        let mut canvas = RecordingCanvas::new();
        sk.paint(&mut canvas);

        match &canvas.commands()[1] {
            DrawCommand::GradientRect { stops, .. } => {
                assert_eq!(stops[0].color, Color::BLACK);
                assert_eq!(stops[1].color, Color::WHITE);
                assert_eq!(stops[2].color, Color::BLACK);
            }
            DrawCommand::Rect { .. } => panic!("expected gradient rect"),
        }
    }

    // ===== Property Change Tests =====

    #[test]
    fn test_setters_bump_revision() {
        let mut sk = SkeletonLoader::new();
        assert_eq!(sk.revision(), 0);
        sk.set_speed(2.0);
        sk.set_delay_seconds(0.5);
        sk.set_background_color(Color::BLACK);
        sk.set_wave_color(Color::WHITE);
        assert_eq!(sk.revision(), 4);
        assert_eq!(sk.get_speed(), 2.0);
        assert_eq!(sk.get_delay_seconds(), 0.5);
    }

    #[test]
    fn test_on_change_hook_receives_property_names() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let mut sk = SkeletonLoader::new().on_change(move |name| {
            assert!(matches!(name, "speed" | "wave_color"));
            seen.fetch_add(1, Ordering::SeqCst);
        });
        sk.set_speed(3.0);
        sk.set_wave_color(Color::WHITE);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    // ===== Lifecycle Tests =====

    #[test]
    fn test_attach_starts_sweeping() {
        let mut sk = SkeletonLoader::new();
        sk.attach();
        assert!(sk.is_attached());
        assert!(sk.is_sweeping());
        assert!(sk.session_id().is_some());
    }

    #[test]
    fn test_attach_never_panics_with_extreme_config() {
        let mut sk = SkeletonLoader::new()
            .speed(f64::NAN)
            .delay_seconds(f64::NEG_INFINITY);
        sk.attach();
        sk.advance(ticks(3));
        assert!(sk.is_attached());
    }

    #[test]
    fn test_detach_stops_writes() {
        let mut sk = SkeletonLoader::new();
        sk.attach();
        sk.advance(ticks(5));
        let writes = sk.stop_write_count();
        assert_eq!(writes, 5);

        sk.detach();
        assert!(!sk.is_attached());
        assert!(!sk.has_scheduled_work());

        sk.advance(ticks(20));
        assert_eq!(sk.stop_write_count(), writes);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut sk = SkeletonLoader::new();
        sk.attach();
        sk.detach();
        sk.detach();
        assert!(!sk.is_attached());
    }

    #[test]
    fn test_detach_without_attach_is_harmless() {
        let mut sk = SkeletonLoader::new();
        sk.detach();
        sk.advance(ticks(5));
        assert_eq!(sk.stop_write_count(), 0);
    }

    #[test]
    fn test_attach_detach_before_first_tick_leaves_no_work() {
        let mut sk = SkeletonLoader::new();
        sk.attach();
        sk.detach();
        assert!(!sk.has_scheduled_work());

        sk.advance(ticks(200));
        assert_eq!(sk.stop_write_count(), 0);
    }

    #[test]
    fn test_reattach_restarts_from_band_start() {
        let mut sk = SkeletonLoader::new();
        sk.attach();
        let first = sk.session_id();
        sk.advance(ticks(30));
        assert!(sk.band_offsets().center > 0.5);

        sk.detach();
        sk.attach();
        let second = sk.session_id();
        assert_ne!(first, second);

        // Band resets to the start position on re-attach.
        assert!((sk.band_offsets().center - 0.0).abs() < 0.001);
        assert!(sk.is_sweeping());

        sk.advance(ticks(1));
        assert!((sk.band_offsets().center - 0.032).abs() < 0.001);
    }

    #[test]
    fn test_attach_while_attached_supersedes_old_session() {
        let mut sk = SkeletonLoader::new();
        sk.attach();
        sk.advance(ticks(10));
        let writes_before = sk.stop_write_count();

        sk.attach();
        assert!(sk.is_sweeping());
        sk.advance(ticks(1));

        // The new session's loop keeps writing.
        assert_eq!(sk.stop_write_count(), writes_before + 1);
        assert!((sk.band_offsets().center - 0.032).abs() < 0.001);
    }

    // ===== Shimmer Progress Tests =====

    #[test]
    fn test_full_sweep_then_pause_then_restart() {
        let mut sk = SkeletonLoader::new();
        sk.attach();

        sk.advance(ticks(FULL_SWEEP_TICKS));
        assert!((sk.band_offsets().center - 2.0).abs() < 0.001);
        assert!(sk.is_waiting());
        let writes = sk.stop_write_count();

        // Delay passes with no writes, then sweeping resumes.
        sk.advance(ticks(FULL_SWEEP_TICKS));
        assert_eq!(sk.stop_write_count(), writes);
        assert!(sk.is_sweeping());

        sk.advance(ticks(1));
        assert!((sk.band_offsets().center - 0.032).abs() < 0.001);
    }

    #[test]
    fn test_zero_delay_runs_back_to_back() {
        let mut sk = SkeletonLoader::new().delay_seconds(0.0);
        sk.attach();
        sk.advance(ticks(FULL_SWEEP_TICKS + 5));
        assert_eq!(sk.stop_write_count(), u64::from(FULL_SWEEP_TICKS) + 5);
        assert!(sk.is_sweeping());
    }

    #[test]
    fn test_speed_change_applies_to_next_sweep() {
        let mut sk = SkeletonLoader::new().delay_seconds(0.0);
        sk.attach();
        sk.advance(ticks(10));
        sk.set_speed(0.25);

        // The in-flight sweep finishes on its original 1000 ms schedule.
        sk.advance(ticks(FULL_SWEEP_TICKS - 10));
        assert!((sk.band_offsets().center - 2.0).abs() < 0.001);

        // The next sweep runs at 250 ms: 16 ticks to completion.
        sk.advance(ticks(16));
        assert!((sk.band_offsets().center - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_band_offsets_stay_ordered_throughout() {
        let mut sk = SkeletonLoader::new().delay_seconds(0.0);
        sk.attach();
        for _ in 0..200 {
            sk.advance(ticks(1));
            assert!(sk.band_offsets().is_ordered());
        }
    }

    // ===== Diagnostics Tests =====

    #[test]
    fn test_custom_sink_installed() {
        let sink = MemorySink::shared();
        let mut sk = SkeletonLoader::new().diagnostics(sink.clone());
        sk.attach();
        sk.advance(ticks(5));
        sk.detach();
        // The ordinary lifecycle produces no diagnostics.
        assert!(sink.is_empty());
    }

    // ===== Widget Trait Tests =====

    #[test]
    fn test_type_id() {
        let sk = SkeletonLoader::new();
        assert_eq!(Widget::type_id(&sk), TypeId::of::<SkeletonLoader>());
    }

    #[test]
    fn test_measure_uses_minimum_size() {
        let sk = SkeletonLoader::new().min_width(150.0).min_height(24.0);
        let size = sk.measure(Constraints::loose(Size::new(300.0, 100.0)));
        assert_eq!(size, Size::new(150.0, 24.0));
    }

    #[test]
    fn test_measure_respects_constraints() {
        let sk = SkeletonLoader::new().min_width(150.0).min_height(24.0);
        let size = sk.measure(Constraints::loose(Size::new(120.0, 16.0)));
        assert_eq!(size, Size::new(120.0, 16.0));
    }

    #[test]
    fn test_layout_stores_bounds() {
        let mut sk = SkeletonLoader::new();
        let bounds = Rect::new(10.0, 20.0, 200.0, 24.0);
        let result = sk.layout(bounds);
        assert_eq!(result.size, Size::new(200.0, 24.0));
        assert_eq!(Widget::bounds(&sk), bounds);
    }

    #[test]
    fn test_children_empty() {
        let mut sk = SkeletonLoader::new();
        assert!(sk.children().is_empty());
        assert!(sk.children_mut().is_empty());
    }

    #[test]
    fn test_not_interactive() {
        let sk = SkeletonLoader::new();
        assert!(!sk.is_interactive());
    }

    // ===== Paint Tests =====

    #[test]
    fn test_paint_panel_then_gradient() {
        let mut sk = SkeletonLoader::new();
        sk.layout(Rect::new(0.0, 0.0, 200.0, 24.0));

        let mut canvas = RecordingCanvas::new();
        sk.paint(&mut canvas);
        assert_eq!(canvas.command_count(), 2);

        match &canvas.commands()[0] {
            DrawCommand::Rect { bounds, color, .. } => {
                assert_eq!(bounds.width, 200.0);
                assert_eq!(*color, Color::from_rgb8(60, 60, 60));
            }
            DrawCommand::GradientRect { .. } => panic!("expected panel rect first"),
        }
        match &canvas.commands()[1] {
            DrawCommand::GradientRect { stops, .. } => assert_eq!(stops.len(), 3),
            DrawCommand::Rect { .. } => panic!("expected gradient rect second"),
        }
    }

    #[test]
    fn test_paint_square_corners_uses_plain_rect() {
        let mut sk = SkeletonLoader::new().corner_radius(0.0);
        sk.layout(Rect::new(0.0, 0.0, 100.0, 20.0));

        let mut canvas = RecordingCanvas::new();
        sk.paint(&mut canvas);

        match &canvas.commands()[0] {
            DrawCommand::Rect { radius, .. } => assert!(radius.is_zero()),
            DrawCommand::GradientRect { .. } => panic!("expected panel rect first"),
        }
    }

    #[test]
    fn test_paint_reflects_sweep_progress() {
        let mut sk = SkeletonLoader::new();
        sk.layout(Rect::new(0.0, 0.0, 200.0, 24.0));
        sk.attach();
        sk.advance(ticks(10));

        let mut canvas = RecordingCanvas::new();
        sk.paint(&mut canvas);

        match &canvas.commands()[1] {
            DrawCommand::GradientRect { stops, .. } => {
                // After 160 ms of a 1000 ms sweep, d = 0.32.
                assert!((stops[1].offset - 0.32).abs() < 0.001);
                assert!((stops[0].offset - 0.02).abs() < 0.001);
                assert!((stops[2].offset - 0.62).abs() < 0.001);
            }
            DrawCommand::Rect { .. } => panic!("expected gradient rect"),
        }
    }
}
