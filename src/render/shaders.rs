/// Vertex shader for the tree tubes
pub const TREE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec3 v_world_position;
out vec2 v_uv;

void main() {
    vec4 world_pos = u_model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    v_normal = mat3(u_model) * a_normal;
    v_uv = a_uv;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Fragment shader: bark tones with a single directional light
pub const TREE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world_position;
in vec2 v_uv;

uniform vec3 u_camera_pos;
uniform vec3 u_base_color;
uniform float u_ambient_strength;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    // Directional light from above-right
    vec3 light_dir = normalize(vec3(0.5, 1.0, 0.3));
    float ndotl = max(dot(normal, light_dir), 0.0);

    vec3 ambient = vec3(0.4, 0.45, 0.5) * u_ambient_strength;
    vec3 diffuse = u_base_color * ndotl * 0.8;

    // Subtle rim lighting for depth
    float rim = pow(1.0 - max(dot(normal, view_dir), 0.0), 3.0);
    vec3 rim_light = vec3(0.6, 0.55, 0.5) * rim * 0.15;

    vec3 color = u_base_color * ambient + diffuse + rim_light;
    fragColor = vec4(color, 1.0);
}
"#;
