//! The three demos and the [`Demo`] context that owns everything one of them puts on the GPU.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use glam::{Mat4, Vec3};

use crate::{
    config::{DemoConfig, WindowConfig},
    error::Result,
    event::Event,
    geometry::Geometry,
    gpu::{Gpu, ShaderStage},
    mesh::Mesh,
    scene::Scene,
    shader::{Shader, ShaderProgram, ShaderSource},
    texture::Texture,
    transform::{Camera, SceneTransform, Tumble},
};

const TRIANGLE_VERTEX_SHADER: &str = "#version 330 core
in vec2 coord2d;
void main() {
    gl_Position = vec4(coord2d, 0.0, 1.0);
}
";

const TRIANGLE_FRAGMENT_SHADER: &str = "#version 330 core
out vec4 frag_color;
void main() {
    frag_color = vec4(gl_FragCoord.x / 600.0, gl_FragCoord.y / 600.0, 0.5, 1.0);
}
";

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Which of the three programs to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    Triangle,
    Cube,
    TexturedCube,
}

impl DemoKind {
    /// The binary name, also used to find the optional config file.
    pub fn binary_name(self) -> &'static str {
        match self {
            DemoKind::Triangle => "first-triangle",
            DemoKind::Cube => "first-cube",
            DemoKind::TexturedCube => "first-texture",
        }
    }

    /// The built-in configuration: a 600x600 window titled after the demo.
    pub fn config(self, assets_dir: impl Into<PathBuf>) -> DemoConfig {
        let title = match self {
            DemoKind::Triangle => "First triangle",
            DemoKind::Cube => "First Cube",
            DemoKind::TexturedCube => "First Texture",
        };
        DemoConfig::new(
            WindowConfig {
                title: title.to_string(),
                width: 600,
                height: 600,
                // The triangle's fragment shader assumes a 600x600 framebuffer.
                resizable: self != DemoKind::Triangle,
            },
            assets_dir,
        )
    }

    pub fn descriptor(self) -> DemoDescriptor {
        match self {
            DemoKind::Triangle => DemoDescriptor {
                vertex_shader: ShaderSource::Inline {
                    name: "triangle.vert",
                    text: TRIANGLE_VERTEX_SHADER,
                },
                fragment_shader: ShaderSource::Inline {
                    name: "triangle.frag",
                    text: TRIANGLE_FRAGMENT_SHADER,
                },
                geometry: Geometry::triangle(),
                motion: None,
                texture: None,
                clear_color: WHITE,
                depth_test: false,
            },
            DemoKind::Cube => DemoDescriptor {
                vertex_shader: ShaderSource::File("CubeVertexShader.glsl"),
                fragment_shader: ShaderSource::File("CubeFragShader.glsl"),
                geometry: Geometry::colored_cube(),
                motion: Some(Motion::new(Tumble::uniform(35.0))),
                texture: None,
                clear_color: BLACK,
                depth_test: true,
            },
            DemoKind::TexturedCube => DemoDescriptor {
                vertex_shader: ShaderSource::File("TexturedCubeShader.vert"),
                fragment_shader: ShaderSource::File("TexturedCubeShader.frag"),
                geometry: Geometry::textured_cube(),
                motion: Some(Motion::new(Tumble {
                    degrees_per_second: 15.0,
                    axis_rates: Vec3::new(3.0, 2.0, 4.0),
                })),
                texture: Some(TextureSpec {
                    file: "woodenCrate.png",
                    sampler: "mytexture",
                    unit: 0,
                }),
                clear_color: BLACK,
                depth_test: true,
            },
        }
    }
}

/// How a demo moves: a tumble seen through a fixed camera, uploaded as a matrix uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub tumble: Tumble,
    pub camera: Camera,
    pub model: Mat4,
    /// Name of the `mat4` uniform receiving the model-view-projection matrix.
    pub uniform: &'static str,
}

impl Motion {
    /// The cube setup: the model pushed four units away, uploaded to `mvp`.
    pub fn new(tumble: Tumble) -> Self {
        Self {
            tumble,
            camera: Camera::default(),
            model: Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)),
            uniform: "mvp",
        }
    }
}

/// An image file sampled by the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSpec {
    pub file: &'static str,
    pub sampler: &'static str,
    pub unit: u32,
}

/// Everything that distinguishes one demo from another.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoDescriptor {
    pub vertex_shader: ShaderSource,
    pub fragment_shader: ShaderSource,
    pub geometry: Geometry,
    pub motion: Option<Motion>,
    pub texture: Option<TextureSpec>,
    pub clear_color: [f32; 4],
    pub depth_test: bool,
}

struct Animation<G: Gpu> {
    transform: SceneTransform,
    location: G::UniformLocation,
    mvp: Mat4,
}

struct Sampler<G: Gpu> {
    texture: Texture<G>,
    location: G::UniformLocation,
    unit: u32,
}

/// The GPU state of one running demo.
///
/// Dropping it releases the program, the mesh buffers and the texture, each exactly once.
pub struct Demo<G: Gpu> {
    gpu: Arc<G>,
    program: ShaderProgram<G>,
    mesh: Mesh<G>,
    sampler: Option<Sampler<G>>,
    animation: Option<Animation<G>>,
    viewport: (u32, u32),
    clear_color: [f32; 4],
    depth_test: bool,
}

impl<G: Gpu> Demo<G> {
    /// Compiles, links, resolves and uploads everything `descriptor` asks for.
    pub fn new(
        gpu: &Arc<G>,
        descriptor: &DemoDescriptor,
        assets_dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let program = {
            let vert = Shader::from_source(
                gpu,
                ShaderStage::Vertex,
                &descriptor.vertex_shader,
                assets_dir,
            )?;
            let frag = Shader::from_source(
                gpu,
                ShaderStage::Fragment,
                &descriptor.fragment_shader,
                assets_dir,
            )?;
            ShaderProgram::new(gpu, &[&vert, &frag])?
        };

        let locations = descriptor
            .geometry
            .attributes
            .iter()
            .map(|attribute| program.attrib_location(attribute.name))
            .collect::<Result<Vec<_>>>()?;

        let animation = match &descriptor.motion {
            Some(motion) => Some(Animation {
                transform: SceneTransform::new(
                    motion.tumble,
                    motion.camera,
                    motion.model,
                    width,
                    height,
                ),
                location: program.uniform_location(motion.uniform)?,
                mvp: Mat4::IDENTITY,
            }),
            None => None,
        };

        let sampler = match &descriptor.texture {
            Some(texture) => {
                let location = program.uniform_location(texture.sampler)?;
                Some(Sampler {
                    texture: Texture::load(gpu, &assets_dir.join(texture.file))?,
                    location,
                    unit: texture.unit,
                })
            }
            None => None,
        };

        let mesh = Mesh::new(gpu, &descriptor.geometry, &locations)?;

        let mut demo = Self {
            gpu: Arc::clone(gpu),
            program,
            mesh,
            sampler,
            animation,
            viewport: (width, height),
            clear_color: descriptor.clear_color,
            depth_test: descriptor.depth_test,
        };
        demo.update(Duration::ZERO);
        Ok(demo)
    }

    /// Follows a window resize: new viewport and, for animated demos, a new aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if let Some(animation) = &mut self.animation {
            animation.transform.resize(width, height);
        }
    }

    /// The model-view-projection matrix of the last update, if the demo moves at all.
    pub fn mvp(&self) -> Option<Mat4> {
        self.animation.as_ref().map(|animation| animation.mvp)
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

impl<G: Gpu> Scene for Demo<G> {
    fn handle_event(&mut self, event: &Event) {
        if let Event::Resized { width, height } = *event {
            self.resize(width, height);
        }
    }

    fn update(&mut self, elapsed: Duration) {
        if let Some(animation) = &mut self.animation {
            animation.mvp = animation.transform.mvp(elapsed);
        }
    }

    fn render(&mut self) {
        let (width, height) = self.viewport;
        self.gpu.viewport(width, height);
        self.gpu.clear(self.clear_color, self.depth_test);

        self.program.use_program();
        if let Some(animation) = &self.animation {
            self.program.set_uniform(&animation.location, animation.mvp);
        }
        if let Some(sampler) = &self.sampler {
            sampler.texture.bind(sampler.unit);
            self.program
                .set_uniform(&sampler.location, sampler.unit as i32);
        }

        self.mesh.draw();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        error::DemoError,
        event::Key,
        runner::FrameLoop,
        testing::{
            Call, FakeGpu, Kind, Screen, Script, SteppingClock, VALID_FRAGMENT, VALID_VERTEX,
        },
    };

    const TEXTURED_VERTEX: &str = "#version 330 core
in vec3 coord3d;
in vec2 texcoord;
out vec2 f_texcoord;
uniform mat4 mvp;
void main() {
    gl_Position = mvp * vec4(coord3d, 1.0);
    f_texcoord = texcoord;
}
";

    const TEXTURED_FRAGMENT: &str = "#version 330 core
in vec2 f_texcoord;
out vec4 frag_color;
uniform sampler2D mytexture;
void main() {
    frag_color = texture(mytexture, f_texcoord);
}
";

    fn cube_assets() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CubeVertexShader.glsl"), VALID_VERTEX).unwrap();
        std::fs::write(dir.path().join("CubeFragShader.glsl"), VALID_FRAGMENT).unwrap();
        dir
    }

    fn texture_assets() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("TexturedCubeShader.vert"), TEXTURED_VERTEX).unwrap();
        std::fs::write(dir.path().join("TexturedCubeShader.frag"), TEXTURED_FRAGMENT).unwrap();
        image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 150, 100, 255]))
            .save(dir.path().join("woodenCrate.png"))
            .unwrap();
        dir
    }

    fn frame_loop(frames: usize) -> FrameLoop<Script, Screen, SteppingClock> {
        FrameLoop::new(
            Script::new(vec![vec![]; frames]),
            Screen::default(),
            SteppingClock::new(Duration::from_millis(500)),
            Key::End,
        )
    }

    fn assert_released(gpu: &FakeGpu) {
        assert!(gpu.leaks().is_empty(), "leaked: {:?}", gpu.leaks());
        assert!(
            gpu.double_frees().is_empty(),
            "freed twice: {:?}",
            gpu.double_frees()
        );
    }

    #[test]
    fn triangle_draws_once_per_frame_and_cleans_up() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = tempfile::tempdir().unwrap();
        {
            let mut demo = Demo::new(
                &gpu,
                &DemoKind::Triangle.descriptor(),
                dir.path(),
                600,
                600,
            )
            .unwrap();
            assert_eq!(demo.mvp(), None);
            gpu.clear_calls();

            let summary = frame_loop(3).run(&mut demo);
            assert_eq!(summary.frames, 3);
            assert_eq!(gpu.draw_count(), 3);
            assert!(gpu.calls().contains(&Call::Clear {
                color: WHITE,
                depth: false
            }));
            assert!(!gpu.calls().iter().any(|call| matches!(call, Call::SetMat4(..))));
        }
        assert_released(&gpu);
    }

    #[test]
    fn cube_uploads_mvp_before_each_draw() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = cube_assets();
        let descriptor = DemoKind::Cube.descriptor();
        {
            let mut demo = Demo::new(&gpu, &descriptor, dir.path(), 600, 600).unwrap();
            gpu.clear_calls();
            frame_loop(2).run(&mut demo);

            let motion = descriptor.motion.unwrap();
            let transform =
                SceneTransform::new(motion.tumble, motion.camera, motion.model, 600, 600);
            let uploaded: Vec<Mat4> = gpu
                .calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::SetMat4(_, mvp) => Some(mvp),
                    _ => None,
                })
                .collect();
            assert_eq!(
                uploaded,
                vec![
                    transform.mvp(Duration::ZERO),
                    transform.mvp(Duration::from_millis(500))
                ]
            );
            assert_eq!(gpu.draw_count(), 2);
            assert!(gpu.calls().contains(&Call::DrawIndexed(36)));
            assert!(gpu.calls().contains(&Call::Clear {
                color: BLACK,
                depth: true
            }));
        }
        assert_released(&gpu);
        assert_eq!(gpu.created(Kind::Program), 1);
        assert_eq!(gpu.created(Kind::Buffer), 3);
    }

    #[test]
    fn textured_cube_binds_its_texture_to_the_sampler() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = texture_assets();
        {
            let mut demo = Demo::new(
                &gpu,
                &DemoKind::TexturedCube.descriptor(),
                dir.path(),
                600,
                600,
            )
            .unwrap();
            gpu.clear_calls();
            demo.render();

            let calls = gpu.calls();
            let bind = calls
                .iter()
                .position(|call| matches!(call, Call::BindTexture { unit: 0, .. }))
                .unwrap();
            let draw = calls
                .iter()
                .position(|call| matches!(call, Call::DrawIndexed(36)))
                .unwrap();
            assert!(bind < draw);
            assert!(calls.iter().any(|call| matches!(call, Call::SetI32(_, 0))));
            assert_eq!(gpu.draw_count(), 1);
        }
        assert_released(&gpu);
        assert_eq!(gpu.created(Kind::Texture), 1);
    }

    #[test]
    fn quit_before_first_frame_draws_nothing() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = cube_assets();
        {
            let mut demo =
                Demo::new(&gpu, &DemoKind::Cube.descriptor(), dir.path(), 600, 600).unwrap();
            let mut frame_loop = FrameLoop::new(
                Script::new(vec![vec![Event::KeyDown(Key::End)]]),
                Screen::default(),
                SteppingClock::new(Duration::from_millis(16)),
                Key::End,
            );
            assert_eq!(frame_loop.run(&mut demo).frames, 0);
            assert_eq!(frame_loop.surface().presented, 0);
        }
        assert_eq!(gpu.draw_count(), 0);
        assert_released(&gpu);
    }

    #[test]
    fn resize_changes_viewport_and_projection() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = cube_assets();
        let mut demo =
            Demo::new(&gpu, &DemoKind::Cube.descriptor(), dir.path(), 600, 600).unwrap();
        let square = demo.mvp().unwrap();

        demo.handle_event(&Event::Resized {
            width: 1200,
            height: 600,
        });
        demo.update(Duration::ZERO);
        demo.render();

        assert_eq!(demo.viewport(), (1200, 600));
        assert!(gpu.calls().contains(&Call::Viewport(1200, 600)));
        assert_ne!(demo.mvp().unwrap(), square);
    }

    #[test]
    fn missing_shader_file_fails_without_leaking() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CubeVertexShader.glsl"), VALID_VERTEX).unwrap();

        let err = Demo::new(&gpu, &DemoKind::Cube.descriptor(), dir.path(), 600, 600)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            DemoError::Asset { ref path, .. } if path.ends_with("CubeFragShader.glsl")
        ));
        assert_released(&gpu);
    }

    #[test]
    fn invalid_shader_fails_with_diagnostics() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = cube_assets();
        std::fs::write(dir.path().join("CubeFragShader.glsl"), "vec4 oops(").unwrap();

        let err = Demo::new(&gpu, &DemoKind::Cube.descriptor(), dir.path(), 600, 600)
            .err()
            .unwrap();
        match err {
            DemoError::ShaderCompile { stage, name, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert_eq!(name, "CubeFragShader.glsl");
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_released(&gpu);
    }

    #[test]
    fn missing_uniform_is_fatal() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = cube_assets();
        std::fs::write(
            dir.path().join("CubeVertexShader.glsl"),
            VALID_VERTEX.replace("mvp", "transform"),
        )
        .unwrap();

        let err = Demo::new(&gpu, &DemoKind::Cube.descriptor(), dir.path(), 600, 600)
            .err()
            .unwrap();
        assert!(matches!(err, DemoError::MissingUniform(ref name) if name == "mvp"));
        assert_released(&gpu);
    }

    #[test]
    fn missing_texture_is_fatal() {
        let gpu = Arc::new(FakeGpu::default());
        let dir = texture_assets();
        std::fs::remove_file(dir.path().join("woodenCrate.png")).unwrap();

        let err = Demo::new(
            &gpu,
            &DemoKind::TexturedCube.descriptor(),
            dir.path(),
            600,
            600,
        )
        .err()
        .unwrap();
        assert!(matches!(err, DemoError::Texture { .. }));
        assert_released(&gpu);
    }

    #[test]
    fn presets_match_the_demos() {
        let triangle = DemoKind::Triangle.config("assets");
        assert_eq!(triangle.window.title, "First triangle");
        assert!(!triangle.window.resizable);
        assert_eq!(triangle.quit_key, Key::End);

        let texture = DemoKind::TexturedCube.config("assets");
        assert_eq!((texture.window.width, texture.window.height), (600, 600));
        assert!(texture.window.resizable);
        assert_eq!(DemoKind::TexturedCube.binary_name(), "first-texture");
    }

    #[test]
    fn shipped_assets_satisfy_every_demo() {
        let assets = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../firstgl-client/assets"
        ));
        for kind in [DemoKind::Triangle, DemoKind::Cube, DemoKind::TexturedCube] {
            let gpu = Arc::new(FakeGpu::default());
            {
                let mut demo = Demo::new(&gpu, &kind.descriptor(), assets, 600, 600)
                    .unwrap_or_else(|e| panic!("{}: {e}", kind.binary_name()));
                assert_eq!(frame_loop(1).run(&mut demo).frames, 1);
                assert_eq!(gpu.draw_count(), 1);
            }
            assert_released(&gpu);
        }
    }
}
