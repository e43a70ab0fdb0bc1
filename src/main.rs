//! Bat Chase entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement,
        KeyboardEvent, TouchEvent,
    };

    use bat_chase::audio::{AudioBackend, Sound};
    use bat_chase::consts::*;
    use bat_chase::render::{
        AssetError, Atlas, DrawSink, Glyph, GlyphKey, GlyphRasterizer, ImageInfo, ImageLoader,
        Quad, TextureId,
    };
    use bat_chase::sim::FontId;
    use bat_chase::sim::entity::{ImageId, WHITE};
    use bat_chase::viewport::Viewport;
    use bat_chase::{Game, Settings};

    const ASSET_ROOT: &str = "assets/";

    /// Anything the canvas can blit
    enum Texture {
        Image(HtmlImageElement),
        Canvas(HtmlCanvasElement),
    }

    /// Canvas 2D implementation of the render traits
    struct CanvasHost {
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        /// Offscreen canvas used to tint textures
        scratch: HtmlCanvasElement,
        scratch_ctx: CanvasRenderingContext2d,
        textures: Vec<Texture>,
        viewport: Viewport,
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
        canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }

    fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
        document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)
    }

    fn css_color(c: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (c[0] * 255.0) as u8,
            (c[1] * 255.0) as u8,
            (c[2] * 255.0) as u8,
            c[3]
        )
    }

    fn css_font(font: FontId, size: u32) -> String {
        match font {
            FontId::TITLE => format!("bold {size}px serif"),
            _ => format!("bold {size}px monospace"),
        }
    }

    impl CanvasHost {
        fn new(document: Document, canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
            let ctx = context_2d(&canvas)?;
            let scratch = create_canvas(&document)?;
            let scratch_ctx = context_2d(&scratch)?;
            Ok(Self {
                document,
                canvas,
                ctx,
                scratch,
                scratch_ctx,
                textures: Vec::new(),
                viewport: Viewport::fit(GAME_WIDTH, GAME_HEIGHT),
            })
        }

        fn add_texture(&mut self, texture: Texture) -> TextureId {
            self.textures.push(texture);
            TextureId(self.textures.len() as u32 - 1)
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.viewport = Viewport::fit(width as f32, height as f32);
        }

        fn blit(
            ctx: &CanvasRenderingContext2d,
            texture: &Texture,
            pos: Vec2,
            size: Vec2,
        ) -> Result<(), JsValue> {
            let (x, y, w, h) = (pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            match texture {
                Texture::Image(img) => {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                }
                Texture::Canvas(c) => {
                    ctx.draw_image_with_html_canvas_element_and_dw_and_dh(c, x, y, w, h)
                }
            }
        }

        /// Draw `texture` recolored through the scratch canvas
        fn blit_tinted(&self, texture: &Texture, quad: &Quad) -> Result<(), JsValue> {
            let (w, h) = (quad.size.x.ceil().max(1.0), quad.size.y.ceil().max(1.0));
            if self.scratch.width() < w as u32 || self.scratch.height() < h as u32 {
                self.scratch.set_width(self.scratch.width().max(w as u32));
                self.scratch.set_height(self.scratch.height().max(h as u32));
            }
            let sc = &self.scratch_ctx;
            sc.set_global_composite_operation("source-over")?;
            sc.clear_rect(0.0, 0.0, w as f64, h as f64);
            Self::blit(sc, texture, Vec2::ZERO, quad.size)?;
            sc.set_global_composite_operation("source-in")?;
            sc.set_fill_style_str(&css_color(quad.tint));
            sc.fill_rect(0.0, 0.0, w as f64, h as f64);

            self.ctx
                .draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    &self.scratch,
                    0.0,
                    0.0,
                    w as f64,
                    h as f64,
                    quad.pos.x as f64,
                    quad.pos.y as f64,
                    w as f64,
                    h as f64,
                )
        }
    }

    /// Images decoded ahead of time, handed to the atlas synchronously
    struct PreloadedImages<'a> {
        host: &'a mut CanvasHost,
        images: HashMap<String, HtmlImageElement>,
    }

    impl ImageLoader for PreloadedImages<'_> {
        fn load_image(&mut self, name: &str) -> Result<ImageInfo, AssetError> {
            let img = self.images.remove(name).ok_or_else(|| AssetError::Load {
                name: name.to_string(),
                reason: "not preloaded".to_string(),
            })?;
            let (width, height) = (img.natural_width() as f32, img.natural_height() as f32);
            let texture = self.host.add_texture(Texture::Image(img));
            Ok(ImageInfo {
                texture,
                width,
                height,
            })
        }
    }

    async fn decode_image(name: &str) -> Result<HtmlImageElement, AssetError> {
        let load_err = |e: JsValue| AssetError::Load {
            name: name.to_string(),
            reason: format!("{e:?}"),
        };
        let img = HtmlImageElement::new().map_err(load_err)?;
        img.set_src(&format!("{ASSET_ROOT}{name}"));
        JsFuture::from(img.decode()).await.map_err(load_err)?;
        Ok(img)
    }

    impl GlyphRasterizer for CanvasHost {
        fn rasterize(&mut self, key: GlyphKey) -> Option<Glyph> {
            if key.ch.is_control() {
                return None;
            }
            let canvas = create_canvas(&self.document).ok()?;
            let ctx = context_2d(&canvas).ok()?;
            let font = css_font(key.font, key.size);
            let text = key.ch.to_string();

            ctx.set_font(&font);
            let width = ctx.measure_text(&text).ok()?.width().ceil();
            if width <= 0.0 {
                return None;
            }
            let height = (key.size as f64 * 1.25).ceil();
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            // Resizing resets the context state
            ctx.set_font(&font);
            ctx.set_text_baseline("top");
            ctx.set_fill_style_str(&css_color(WHITE));
            ctx.fill_text(&text, 0.0, 0.0).ok()?;

            let texture = self.add_texture(Texture::Canvas(canvas));
            Some(Glyph {
                texture,
                size: Vec2::new(width as f32, height as f32),
            })
        }
    }

    impl DrawSink for CanvasHost {
        fn begin_frame(&mut self) {
            let vp = self.viewport;
            let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            self.ctx.set_fill_style_str("black");
            self.ctx.fill_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
            let _ = self.ctx.set_transform(
                vp.scale as f64,
                0.0,
                0.0,
                vp.scale as f64,
                vp.offset.x as f64,
                vp.offset.y as f64,
            );
            self.ctx.set_image_smoothing_enabled(false);
        }

        fn draw(&mut self, quad: &Quad) {
            let Some(texture) = self.textures.get(quad.texture.0 as usize) else {
                log::warn!("Unknown texture {:?}", quad.texture);
                return;
            };
            let result = if quad.tint == WHITE {
                Self::blit(&self.ctx, texture, quad.pos, quad.size)
            } else {
                self.blit_tinted(texture, quad)
            };
            if let Err(e) = result {
                log::warn!("Draw failed: {:?}", e);
            }
        }
    }

    /// HTML audio element per clip
    #[derive(Default)]
    struct HtmlAudio {
        clips: HashMap<Sound, HtmlAudioElement>,
    }

    impl AudioBackend for HtmlAudio {
        fn preload(&mut self, sound: Sound, url: &str) {
            match HtmlAudioElement::new_with_src(&format!("{ASSET_ROOT}{url}")) {
                Ok(el) => {
                    el.set_preload("auto");
                    self.clips.insert(sound, el);
                }
                Err(e) => log::warn!("Failed to preload {}: {:?}", url, e),
            }
        }

        fn play(&mut self, sound: Sound, looped: bool, volume: f32) {
            let Some(el) = self.clips.get(&sound) else {
                return;
            };
            el.set_loop(looped);
            el.set_volume(volume as f64);
            el.set_current_time(0.0);
            if let Err(e) = el.play() {
                log::warn!("Failed to play {:?}: {:?}", sound, e);
            }
        }
    }

    /// Everything the animation frame callback needs
    struct App {
        game: Game,
        host: CanvasHost,
        audio: HtmlAudio,
    }

    impl App {
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            self.host.resize(w as u32, h as u32);
            self.game.resize(w as f32, h as f32);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Bat Chase starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let mut host = CanvasHost::new(document.clone(), canvas)?;

        // Decode every image before the first frame
        let mut images = HashMap::new();
        for id in ImageId::all() {
            let name = id.file_name();
            let img = decode_image(&name)
                .await
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            images.insert(name, img);
        }
        let atlas = Atlas::load(&mut PreloadedImages {
            host: &mut host,
            images,
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let settings = Settings::default();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(atlas, &settings, seed);
        let mut audio = HtmlAudio::default();
        game.preload_audio(&mut audio);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let app = Rc::new(RefCell::new(App { game, host, audio }));
        app.borrow_mut().resize();
        setup_input_handlers(app.clone())?;
        request_animation_frame(app);

        log::info!("Bat Chase running!");
        Ok(())
    }

    fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), JsValue>
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let app = app.clone();
            listen(&window, "keydown", move |event: KeyboardEvent| {
                if app.borrow_mut().game.input_mut().key_down(&event.key()) {
                    event.prevent_default();
                }
            })?;
        }
        {
            let app = app.clone();
            listen(&window, "keyup", move |event: KeyboardEvent| {
                if app.borrow_mut().game.input_mut().key_up(&event.key()) {
                    event.prevent_default();
                }
            })?;
        }

        // Touch
        {
            let app = app.clone();
            listen(&window, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.input_mut().touch_start();
            })?;
        }
        {
            let app = app.clone();
            listen(&window, "touchend", move |_event: TouchEvent| {
                app.borrow_mut().game.input_mut().touch_end();
            })?;
        }
        {
            let app = app.clone();
            listen(&window, "touchcancel", move |_event: TouchEvent| {
                app.borrow_mut().game.input_mut().touch_cancel();
            })?;
        }

        // Window
        {
            let app = app.clone();
            listen(&window, "resize", move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            })?;
        }
        {
            let app = app.clone();
            listen(&window, "blur", move |_event: web_sys::Event| {
                app.borrow_mut().game.input_mut().release_all();
            })?;
        }
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let App { game, host, audio } = &mut *guard;
            game.frame(time, audio, host);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use bat_chase::audio::{AudioBackend, Sound};
    use bat_chase::consts::*;
    use bat_chase::input::Input;
    use bat_chase::render::{
        AssetError, Atlas, DrawSink, Glyph, GlyphKey, GlyphRasterizer, ImageInfo, ImageLoader,
        Quad, TextureId,
    };
    use bat_chase::sim::{Room, Tag};
    use bat_chase::{Game, Settings};
    use glam::Vec2;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five minutes of play
    const MAX_FRAMES: usize = 60 * 60 * 5;

    /// Built-in image dimensions matching the shipped art
    pub struct FallbackImages {
        next: u32,
    }

    impl FallbackImages {
        pub fn new() -> Self {
            Self { next: 0 }
        }
    }

    impl ImageLoader for FallbackImages {
        fn load_image(&mut self, name: &str) -> Result<ImageInfo, AssetError> {
            let (width, height) = match name {
                "title.png" => (GAME_WIDTH, GAME_HEIGHT),
                "scorebar.png" => (GAME_WIDTH, GAME_HEIGHT - 314.0),
                "road.png" => (ROAD_SECOND_TILE_X, 200.0),
                "batman.png" => (64.0, 32.0),
                "life.png" => (24.0, 24.0),
                n if n.starts_with("car") => (64.0, 32.0),
                _ => {
                    return Err(AssetError::Load {
                        name: name.to_string(),
                        reason: "no fallback dimensions".to_string(),
                    });
                }
            };
            self.next += 1;
            Ok(ImageInfo {
                texture: TextureId(self.next),
                width,
                height,
            })
        }
    }

    /// Render host that only counts quads
    #[derive(Default)]
    pub struct NullHost {
        pub quads: usize,
    }

    impl GlyphRasterizer for NullHost {
        fn rasterize(&mut self, key: GlyphKey) -> Option<Glyph> {
            key.ch.is_ascii_graphic().then(|| Glyph {
                texture: TextureId(u32::MAX),
                size: Vec2::splat(key.size as f32),
            })
        }
    }

    impl DrawSink for NullHost {
        fn draw(&mut self, _quad: &Quad) {
            self.quads += 1;
        }
    }

    /// Audio backend that logs what it would play
    #[derive(Default)]
    pub struct NullAudio {
        pub crashes: usize,
    }

    impl AudioBackend for NullAudio {
        fn preload(&mut self, _sound: Sound, _url: &str) {}

        fn play(&mut self, sound: Sound, looped: bool, volume: f32) {
            log::debug!("play {:?} loop={} vol={:.2}", sound, looped, volume);
            if matches!(sound, Sound::Crash(_)) {
                self.crashes += 1;
            }
        }
    }

    /// Steering key that moves away from the nearest car ahead in the lane
    fn autopilot(game: &Game) -> Option<&'static str> {
        let scene = &game.state.scene;
        let player = scene.find(Tag::Player)?;
        let car = scene
            .iter()
            .filter(|e| e.tag == Tag::Enemy)
            .filter(|e| e.pos.x + e.size.x > player.pos.x && e.pos.x < player.pos.x + 250.0)
            .filter(|e| (e.center().y - player.center().y).abs() < player.size.y + 8.0)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;

        let go_up = (car.center().y > player.center().y && player.pos.y > 20.0)
            || player.pos.y >= STREET_HEIGHT - 20.0;
        Some(if go_up { "ArrowUp" } else { "ArrowDown" })
    }

    fn apply_steering(input: &mut Input, steer: Option<&str>) {
        input.key_up("ArrowUp");
        input.key_up("ArrowDown");
        input.key_down("ArrowRight");
        if let Some(key) = steer {
            input.key_down(key);
        }
    }

    pub fn run(settings: &Settings, seed: u64) -> Result<(), AssetError> {
        let atlas = Atlas::load(&mut FallbackImages::new())?;
        let mut game = Game::new(atlas, settings, seed);
        let mut host = NullHost::default();
        let mut audio = NullAudio::default();
        game.preload_audio(&mut audio);

        let mut now = 0.0;
        game.input_mut().key_down("Enter");
        game.frame(now, &mut audio, &mut host);
        game.input_mut().key_up("Enter");

        let mut frames = 0;
        while game.state.room == Room::Playing && frames < MAX_FRAMES {
            now += FRAME_MS;
            let steer = autopilot(&game);
            apply_steering(game.input_mut(), steer);
            game.frame(now, &mut audio, &mut host);
            frames += 1;
        }

        log::info!(
            "Run ended in {:?} after {:.1}s: score {:.0}, best {:.0}, lives {}, crashes {}",
            game.state.room,
            frames as f64 * FRAME_MS / 1000.0,
            game.state.score,
            game.state.high_score.best(),
            game.state.lives,
            audio.crashes
        );
        log::info!("{} quads drawn", host.quads);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bat Chase (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => bat_chase::Settings::load_from(path)?,
        None => bat_chase::Settings::default(),
    };
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    headless::run(&settings, seed)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
