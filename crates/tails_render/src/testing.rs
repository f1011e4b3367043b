//! Test doubles for the host-side traits

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use image::{Rgba, RgbaImage};
use slotmap::SlotMap;

use crate::character::{Character, CharacterId, CharacterKind, Pose};
use crate::foundation::collections::TextureKey;
use crate::foundation::math::{Mat4, Vec3};
use crate::parts::{MountPoint, Part, PartInfo, PartModel};
use crate::render::{
    DrawError, GraphicsState, HookError, PreRenderHook, TextureCompiler, TextureError,
    TextureHandle, TextureResources, TextureSource,
};

/// Simple character with mutable pose
#[derive(Debug, Clone)]
pub struct TestCharacter {
    pub id: CharacterId,
    pub kind: CharacterKind,
    pub pose: Pose,
}

impl TestCharacter {
    pub fn new(id: u64, kind: CharacterKind) -> Self {
        Self {
            id: CharacterId(id),
            kind,
            pose: Pose::Standing,
        }
    }

    pub fn player(id: u64) -> Self {
        Self::new(id, CharacterKind::Player)
    }
}

impl Character for TestCharacter {
    fn id(&self) -> CharacterId {
        self.id
    }

    fn kind(&self) -> CharacterKind {
        self.kind.clone()
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn mount_anchor(&self, mount: MountPoint) -> Vec3 {
        match mount {
            MountPoint::Waist => Vec3::new(0.0, 0.75, 0.0),
            _ => Vec3::zeros(),
        }
    }
}

/// Everything that reached the graphics state, hooks and models, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Push,
    Pop,
    Translate(Vec3),
    Scale(Vec3),
    Transform(Mat4),
    Bind(TextureHandle),
    Hook { name: String, partial_tick: f32 },
    Draw { subtype: u32, partial_tick: f32 },
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<Event> {
    log.lock().unwrap().clone()
}

/// Graphics state that records every call and tracks stack depth
#[derive(Debug)]
pub struct RecordingGraphics {
    log: EventLog,
    pub depth: i32,
}

impl RecordingGraphics {
    pub fn new(log: EventLog) -> Self {
        Self { log, depth: 0 }
    }

    fn record(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

impl GraphicsState for RecordingGraphics {
    fn push_state(&mut self) {
        self.depth += 1;
        self.record(Event::Push);
    }

    fn pop_state(&mut self) {
        self.depth -= 1;
        self.record(Event::Pop);
    }

    fn translate(&mut self, offset: Vec3) {
        self.record(Event::Translate(offset));
    }

    fn scale(&mut self, factors: Vec3) {
        self.record(Event::Scale(factors));
    }

    fn transform(&mut self, matrix: &Mat4) {
        self.record(Event::Transform(*matrix));
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.record(Event::Bind(texture));
    }
}

/// Model that draws nothing
pub struct NullModel;

impl PartModel for NullModel {
    fn render(&self, _: &mut dyn GraphicsState, _: &dyn Character, _: u32, _: f32) -> Result<(), DrawError> {
        Ok(())
    }
}

/// Model that records its draws into an event log
pub struct RecordingModel {
    log: EventLog,
    fail: bool,
}

impl RecordingModel {
    pub fn new(log: EventLog) -> Self {
        Self { log, fail: false }
    }

    pub fn failing(log: EventLog) -> Self {
        Self { log, fail: true }
    }
}

impl PartModel for RecordingModel {
    fn render(
        &self,
        _gfx: &mut dyn GraphicsState,
        _character: &dyn Character,
        subtype: u32,
        partial_tick: f32,
    ) -> Result<(), DrawError> {
        if self.fail {
            return Err(DrawError("model buffers lost".to_string()));
        }
        self.log.lock().unwrap().push(Event::Draw { subtype, partial_tick });
        Ok(())
    }
}

/// Hook that shifts the part and optionally logs or fails
pub struct OffsetHook {
    offset: Vec3,
    log: Option<(EventLog, String)>,
    fail: bool,
}

impl OffsetHook {
    pub fn new(offset: Vec3) -> Self {
        Self { offset, log: None, fail: false }
    }

    pub fn logged(offset: Vec3, log: EventLog, name: &str) -> Self {
        Self {
            offset,
            log: Some((log, name.to_string())),
            fail: false,
        }
    }

    pub fn failing(log: EventLog, name: &str) -> Self {
        Self {
            offset: Vec3::zeros(),
            log: Some((log, name.to_string())),
            fail: true,
        }
    }
}

impl PreRenderHook for OffsetHook {
    fn on_pre_render(
        &self,
        gfx: &mut dyn GraphicsState,
        _character: &dyn Character,
        _part: &Part,
        _info: &PartInfo,
        _position: Vec3,
        partial_tick: f32,
    ) -> Result<(), HookError> {
        if let Some((log, name)) = &self.log {
            log.lock().unwrap().push(Event::Hook {
                name: name.clone(),
                partial_tick,
            });
        }
        gfx.translate(self.offset);
        if self.fail {
            return Err(HookError::Failed("compat shim unavailable".to_string()));
        }
        Ok(())
    }
}

/// Compiler producing a 1x1 image and counting invocations
#[derive(Default)]
pub struct CountingCompiler {
    calls: Rc<Cell<usize>>,
    fail: Rc<Cell<bool>>,
}

impl CountingCompiler {
    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }

    pub fn failing(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.fail)
    }
}

impl TextureCompiler for CountingCompiler {
    fn compile(&self, _character: CharacterId, _part: &Part, _info: &PartInfo) -> Result<RgbaImage, TextureError> {
        if self.fail.get() {
            return Err(TextureError::CompileFailed("malformed layer".to_string()));
        }
        self.calls.set(self.calls.get() + 1);
        Ok(RgbaImage::new(1, 1))
    }
}

/// Source serving solid-color layers by slot name
pub struct SolidSource {
    width: u32,
    height: u32,
    layers: HashMap<String, Rgba<u8>>,
}

impl SolidSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layers: HashMap::new(),
        }
    }

    pub fn with_layer(mut self, slot: &str, color: Rgba<u8>) -> Self {
        self.layers.insert(slot.to_string(), color);
        self
    }
}

impl TextureSource for SolidSource {
    fn layer(&self, part: &Part, subid: u32, slot: &str) -> Result<RgbaImage, TextureError> {
        let color = self.layers.get(slot).ok_or_else(|| TextureError::MissingLayer {
            part: part.name().to_string(),
            subid,
            slot: slot.to_string(),
        })?;
        Ok(RgbaImage::from_pixel(self.width, self.height, *color))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceEvent {
    Allocate(TextureHandle),
    Release(TextureHandle),
}

/// Reference-counted resource manager that records allocations and releases
#[derive(Default)]
pub struct TrackingResources {
    refs: SlotMap<TextureKey, u32>,
    events: Vec<ResourceEvent>,
    released: Vec<TextureHandle>,
    double_releases: usize,
    refuse: bool,
}

impl TrackingResources {
    /// Allocate a live handle without an image
    pub fn mint(&mut self) -> TextureHandle {
        let handle = TextureHandle(self.refs.insert(1));
        self.events.push(ResourceEvent::Allocate(handle));
        handle
    }

    pub fn refuse_allocations(&mut self, refuse: bool) {
        self.refuse = refuse;
    }

    pub fn events(&self) -> &[ResourceEvent] {
        &self.events
    }

    pub fn released(&self) -> &[TextureHandle] {
        &self.released
    }

    pub fn double_releases(&self) -> usize {
        self.double_releases
    }

    pub fn live_count(&self) -> usize {
        self.refs.values().filter(|count| **count > 0).count()
    }
}

impl TextureResources for TrackingResources {
    fn allocate(&mut self, _image: RgbaImage) -> Result<TextureHandle, TextureError> {
        if self.refuse {
            return Err(TextureError::Allocation("out of video memory".to_string()));
        }
        Ok(self.mint())
    }

    fn release(&mut self, handle: TextureHandle) -> bool {
        self.events.push(ResourceEvent::Release(handle));
        match self.refs.get_mut(handle.0) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.released.push(handle);
                true
            }
            _ => {
                self.double_releases += 1;
                false
            }
        }
    }
}
