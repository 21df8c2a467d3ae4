use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

pub mod config;
pub mod error;
pub mod growth;
pub mod math;
pub mod mesh;
pub mod render;

use config::TreeConfig;
use error::Error;
use growth::{BranchGenerator, BranchTree};
use math::Vec3;
use mesh::{MeshParams, TreeMesher};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use render::RenderPipeline;

/// Yaw change per arrow-key press (radians)
const ORBIT_KEY_STEP: f32 = 0.08;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Main viewer state exposed to JavaScript
#[wasm_bindgen]
pub struct VerdantArbor {
    pipeline: RenderPipeline,
    config: TreeConfig,
    tree: Option<BranchTree>,
    // Camera orbit controls
    camera_distance: f32,
    camera_angle_x: f32,
    camera_angle_y: f32,
    camera_target: Vec3,
}

#[wasm_bindgen]
impl VerdantArbor {
    /// Create a new viewer and grow the default tree
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<VerdantArbor, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let pipeline = RenderPipeline::new(gl, width, height).map_err(|e| JsValue::from_str(&e))?;

        let mut viewer = Self {
            pipeline,
            config: TreeConfig::default(),
            tree: None,
            camera_distance: 12.0,
            camera_angle_x: 0.3,
            camera_angle_y: 0.0,
            camera_target: Vec3::new(0.0, 3.5, 0.0),
        };

        let config = viewer.config.clone();
        viewer.rebuild(config)?;
        Ok(viewer)
    }

    /// Load a tree description from YAML and rebuild the whole pipeline
    #[wasm_bindgen]
    pub fn load_config(&mut self, yaml: &str) -> Result<(), JsValue> {
        let config = TreeConfig::from_yaml(yaml).map_err(to_js)?;
        self.rebuild(config)
    }

    /// Regrow the current tree description with a different seed
    #[wasm_bindgen]
    pub fn regrow(&mut self, seed: u64) -> Result<(), JsValue> {
        let mut config = self.config.clone();
        config.seed = seed;
        self.rebuild(config)
    }

    fn rebuild(&mut self, config: TreeConfig) -> Result<(), JsValue> {
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let generator = BranchGenerator::new(config.growth);
        let tree = generator
            .generate(
                config.root,
                &mut rng,
                &config.stem_table,
                &config.branch_table,
                config.max_depth,
            )
            .map_err(to_js)?;

        let mesher = TreeMesher::new(MeshParams {
            radial_resolution: config.radial_resolution,
        });
        let mesh = mesher.tessellate(&tree).map_err(to_js)?;

        self.pipeline
            .upload_tree_mesh(&mesh)
            .map_err(|e| JsValue::from_str(&e))?;

        // Frame the camera around the new tree
        self.camera_target = mesh.bounds_center;
        self.camera_distance = (mesh.bounds_radius * 2.5).max(6.0);

        web_sys::console::log_1(
            &format!(
                "verdant-arbor: seed {} grew {} branches ({} vertices, {} indices)",
                config.seed,
                tree.len(),
                mesh.vertex_count(),
                mesh.index_count()
            )
            .into(),
        );

        self.tree = Some(tree);
        self.config = config;
        Ok(())
    }

    /// Update and render a frame
    #[wasm_bindgen]
    pub fn render(&mut self) {
        // Update camera position from orbit angles
        let cos_x = self.camera_angle_x.cos();
        let sin_x = self.camera_angle_x.sin();
        let cos_y = self.camera_angle_y.cos();
        let sin_y = self.camera_angle_y.sin();

        self.pipeline.camera_position = Vec3::new(
            self.camera_target.x + self.camera_distance * cos_x * sin_y,
            self.camera_target.y + self.camera_distance * sin_x,
            self.camera_target.z + self.camera_distance * cos_x * cos_y,
        );
        self.pipeline.camera_target = self.camera_target;

        self.pipeline.render();
    }

    /// Resize the canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        self.pipeline.resize(width, height);
    }

    /// Orbit camera from pointer movement
    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera_angle_y += delta_x * 0.01;
        self.camera_angle_x = (self.camera_angle_x + delta_y * 0.01)
            .clamp(-std::f32::consts::FRAC_PI_2 + 0.1, std::f32::consts::FRAC_PI_2 - 0.1);
    }

    /// Handle a key press; returns true when the key was consumed
    #[wasm_bindgen]
    pub fn on_key_down(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => {
                self.camera_angle_y -= ORBIT_KEY_STEP;
                true
            }
            "ArrowRight" => {
                self.camera_angle_y += ORBIT_KEY_STEP;
                true
            }
            _ => false,
        }
    }

    /// Number of branches in the current tree
    #[wasm_bindgen]
    pub fn branch_count(&self) -> usize {
        self.tree.as_ref().map(|t| t.len()).unwrap_or(0)
    }

    /// Seed of the currently displayed tree
    #[wasm_bindgen]
    pub fn seed(&self) -> u64 {
        self.config.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_grows_and_tessellates() {
        let config = TreeConfig::default();
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let tree = BranchGenerator::new(config.growth)
            .generate(
                config.root,
                &mut rng,
                &config.stem_table,
                &config.branch_table,
                config.max_depth,
            )
            .unwrap();
        assert!(tree.max_depth() <= config.max_depth);

        let mesh = TreeMesher::new(MeshParams {
            radial_resolution: config.radial_resolution,
        })
        .tessellate(&tree)
        .unwrap();

        assert_eq!(mesh.vertex_count(), tree.len() * config.radial_resolution * 2);
        assert_eq!(mesh.index_count(), tree.len() * config.radial_resolution * 6);
    }
}
