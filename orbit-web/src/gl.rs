//! WebGL2 render driver: shader setup, mesh upload, per-frame uniforms.
use orbit_core::{FrameUniforms, Mat4, ScreenTriangle};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::{ShaderStage, WebError};

/// Compile one shader stage. The shader object is deleted on failure.
pub fn compile_shader(gl: &Gl, stage: ShaderStage, source: &str) -> Result<WebGlShader, WebError> {
    let kind = match stage {
        ShaderStage::Vertex => Gl::VERTEX_SHADER,
        ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(kind)
        .ok_or(WebError::ResourceCreation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        return Ok(shader);
    }

    let log = gl.get_shader_info_log(&shader).unwrap_or_default();
    log::error!("{stage} {log}");
    gl.delete_shader(Some(&shader));
    Err(WebError::ShaderCompile { stage, log })
}

/// Link a program from compiled stages. The program object is deleted on failure.
pub fn link_program(
    gl: &Gl,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, WebError> {
    let program = gl
        .create_program()
        .ok_or(WebError::ResourceCreation("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        return Ok(program);
    }

    let log = gl.get_program_info_log(&program).unwrap_or_default();
    log::error!("program link failed: {log}");
    gl.delete_program(Some(&program));
    Err(WebError::ProgramLink(log))
}

struct UniformLocations {
    model_matrix: Option<WebGlUniformLocation>,
    aspect_ratio: Option<WebGlUniformLocation>,
    camera_rotation: Option<WebGlUniformLocation>,
    camera_distance: Option<WebGlUniformLocation>,
    camera_target: Option<WebGlUniformLocation>,
}

impl UniformLocations {
    fn lookup(gl: &Gl, program: &WebGlProgram) -> Self {
        Self {
            model_matrix: gl.get_uniform_location(program, "u_modelMatrix"),
            aspect_ratio: gl.get_uniform_location(program, "u_aspectRatio"),
            camera_rotation: gl.get_uniform_location(program, "u_cameraRotation"),
            camera_distance: gl.get_uniform_location(program, "u_cameraDistance"),
            camera_target: gl.get_uniform_location(program, "u_cameraTarget"),
        }
    }
}

/// Draws the full-screen triangle with the camera uniforms of each frame.
pub struct SceneRenderer {
    gl: Gl,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    uniforms: UniformLocations,
}

impl SceneRenderer {
    pub fn new(
        gl: Gl,
        canvas: HtmlCanvasElement,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, WebError> {
        let vertex = compile_shader(&gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = compile_shader(&gl, ShaderStage::Fragment, fragment_source)?;
        let program = link_program(&gl, &vertex, &fragment)?;
        // The linked program keeps its own copy.
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));

        let vao = upload_screen_triangle(&gl, &program)?;
        let uniforms = UniformLocations::lookup(&gl, &program);

        Ok(Self {
            gl,
            canvas,
            program,
            vao,
            uniforms,
        })
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.canvas.width() as f32 / self.canvas.height().max(1) as f32
    }

    pub fn draw(&self, frame: &FrameUniforms) {
        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        self.set_uniforms(frame);
        gl.draw_elements_with_i32(
            Gl::TRIANGLES,
            ScreenTriangle::INDICES.len() as i32,
            Gl::UNSIGNED_SHORT,
            0,
        );

        // unbind to avoid accidental modification
        gl.bind_vertex_array(None);
        gl.use_program(None);
    }

    fn set_uniforms(&self, frame: &FrameUniforms) {
        let gl = &self.gl;
        let u = &self.uniforms;
        let [pitch, yaw] = frame.camera_rotation;
        let [x, y, z] = frame.camera_target;

        gl.uniform1f(u.aspect_ratio.as_ref(), frame.aspect_ratio);
        gl.uniform2f(u.camera_rotation.as_ref(), pitch, yaw);
        gl.uniform1f(u.camera_distance.as_ref(), frame.camera_distance);
        gl.uniform3f(u.camera_target.as_ref(), x, y, z);
        // Stored row-major; GL wants columns.
        let model = frame.model_matrix.unwrap_or(Mat4::IDENTITY);
        gl.uniform_matrix4fv_with_f32_array(
            u.model_matrix.as_ref(),
            false,
            &model.to_column_major(),
        );
    }
}

fn upload_screen_triangle(gl: &Gl, program: &WebGlProgram) -> Result<WebGlVertexArrayObject, WebError> {
    let vao = gl
        .create_vertex_array()
        .ok_or(WebError::ResourceCreation("vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let index_buffer = gl
        .create_buffer()
        .ok_or(WebError::ResourceCreation("index buffer"))?;
    gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
    gl.buffer_data_with_array_buffer_view(
        Gl::ELEMENT_ARRAY_BUFFER,
        &js_sys::Uint16Array::from(&ScreenTriangle::INDICES[..]),
        Gl::STATIC_DRAW,
    );

    upload_attribute(gl, program, "a_position", 3, &ScreenTriangle::POSITIONS)?;
    upload_attribute(gl, program, "a_uv", 2, &ScreenTriangle::UVS)?;

    // unbind to avoid accidental modification
    gl.bind_vertex_array(None); // before other unbinds
    gl.bind_buffer(Gl::ARRAY_BUFFER, None);
    gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, None);
    Ok(vao)
}

fn upload_attribute(
    gl: &Gl,
    program: &WebGlProgram,
    name: &str,
    components: i32,
    data: &[f32],
) -> Result<(), WebError> {
    let buffer = gl
        .create_buffer()
        .ok_or(WebError::ResourceCreation("vertex buffer"))?;
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(
        Gl::ARRAY_BUFFER,
        &js_sys::Float32Array::from(data),
        Gl::STATIC_DRAW,
    );

    // Negative when the shader optimised the attribute away.
    let Ok(location) = u32::try_from(gl.get_attrib_location(program, name)) else {
        log::warn!("attribute {name} not used by the shader");
        return Ok(());
    };
    gl.vertex_attrib_pointer_with_i32(location, components, Gl::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(location);
    Ok(())
}
