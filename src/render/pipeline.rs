use web_sys::{WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject};

use super::shaders::{TREE_FRAGMENT_SHADER, TREE_VERTEX_SHADER};
use super::webgl::WebGLContext;
use crate::math::{Mat4, Vec3};
use crate::mesh::Mesh;

/// Cached uniform locations for the tree shader
struct TreeUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    base_color: Option<WebGlUniformLocation>,
    ambient_strength: Option<WebGlUniformLocation>,
}

/// Render pipeline: one program, one static mesh, one draw per frame
pub struct RenderPipeline {
    ctx: WebGLContext,

    tree_program: WebGlProgram,
    tree_uniforms: TreeUniforms,

    tree_vao: Option<WebGlVertexArrayObject>,
    tree_vertex_buffer: Option<WebGlBuffer>,
    tree_index_buffer: Option<WebGlBuffer>,
    tree_index_count: i32,

    width: i32,
    height: i32,

    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub fov: f32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        let tree_program = ctx.create_program(TREE_VERTEX_SHADER, TREE_FRAGMENT_SHADER)?;

        let tree_uniforms = TreeUniforms {
            model: ctx.get_uniform_location(&tree_program, "u_model"),
            view: ctx.get_uniform_location(&tree_program, "u_view"),
            projection: ctx.get_uniform_location(&tree_program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&tree_program, "u_camera_pos"),
            base_color: ctx.get_uniform_location(&tree_program, "u_base_color"),
            ambient_strength: ctx.get_uniform_location(&tree_program, "u_ambient_strength"),
        };

        Ok(Self {
            ctx,
            tree_program,
            tree_uniforms,
            tree_vao: None,
            tree_vertex_buffer: None,
            tree_index_buffer: None,
            tree_index_count: 0,
            width,
            height,
            camera_position: Vec3::new(0.0, 4.0, 10.0),
            camera_target: Vec3::new(0.0, 3.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
        })
    }

    /// Upload tree mesh to GPU. The mesh is static: this happens once per
    /// generated tree, never per frame.
    pub fn upload_tree_mesh(&mut self, mesh: &Mesh) -> Result<(), String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_data = mesh.vertex_data();
        let vertex_buffer = self
            .ctx
            .create_buffer_f32(&vertex_data, WebGl2RenderingContext::STATIC_DRAW)?;

        let index_data = mesh.index_data();
        let index_buffer = self
            .ctx
            .create_index_buffer(index_data, WebGl2RenderingContext::STATIC_DRAW)?;

        // Layout: position(3) + normal(3) + uv(2) = 8 floats
        let stride = 8 * 4;

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));

        // Position (location 0)
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, WebGl2RenderingContext::FLOAT, false, stride, 0);

        // Normal (location 1)
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 3, WebGl2RenderingContext::FLOAT, false, stride, 12);

        // UV (location 2)
        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_with_i32(2, 2, WebGl2RenderingContext::FLOAT, false, stride, 24);

        gl.bind_vertex_array(None);

        self.tree_vao = Some(vao);
        self.tree_vertex_buffer = Some(vertex_buffer);
        self.tree_index_buffer = Some(index_buffer);
        self.tree_index_count = index_data.len() as i32;

        Ok(())
    }

    /// Render a frame
    pub fn render(&self) {
        let gl = &self.ctx.gl;

        let aspect = self.width as f32 / self.height as f32;
        let projection = Mat4::perspective(self.fov, aspect, 0.1, 100.0);
        let view = Mat4::look_at(self.camera_position, self.camera_target, Vec3::UP);
        let model = Mat4::identity();

        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(0.02, 0.03, 0.05, 1.0);
        self.ctx.enable_depth_test();

        if self.tree_vao.is_some() {
            gl.use_program(Some(&self.tree_program));

            self.ctx.uniform_matrix4fv(self.tree_uniforms.model.as_ref(), model.as_slice());
            self.ctx.uniform_matrix4fv(self.tree_uniforms.view.as_ref(), view.as_slice());
            self.ctx
                .uniform_matrix4fv(self.tree_uniforms.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_3f(
                self.tree_uniforms.camera_pos.as_ref(),
                self.camera_position.x,
                self.camera_position.y,
                self.camera_position.z,
            );
            self.ctx
                .uniform_3f(self.tree_uniforms.base_color.as_ref(), 0.35, 0.25, 0.18);
            self.ctx.uniform_1f(self.tree_uniforms.ambient_strength.as_ref(), 0.3);

            gl.bind_vertex_array(self.tree_vao.as_ref());
            gl.draw_elements_with_i32(
                WebGl2RenderingContext::TRIANGLES,
                self.tree_index_count,
                WebGl2RenderingContext::UNSIGNED_INT,
                0,
            );
        }
    }

    /// Resize the render pipeline
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }
}
