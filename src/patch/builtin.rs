// Built-in patches for the OpenGL tutorial sources.
// They are applied in order: each later block assumes the earlier ones ran.

use super::Patch;

pub const SET_INPUT: &str = "set-input";
pub const TIDY_INPUT: &str = "tidy-input";
pub const DROP_SCROLL: &str = "drop-scroll";

/// Per-key `ProcessKeyboard` calls, as originally written
pub const PER_KEY_INPUT: &str = r#"void processInput(GLFWwindow* window)
{
    if (glfwGetKey(window, GLFW_KEY_ESCAPE) == GLFW_PRESS)
        glfwSetWindowShouldClose(window, true);

    // 问题在于斜着走会更快，不过这个暂时不用考虑
    if (glfwGetKey(window, GLFW_KEY_W) == GLFW_PRESS)
        camera.ProcessKeyboard(Camera_Movement::FORWARD, deltaTime);
    if (glfwGetKey(window, GLFW_KEY_S) == GLFW_PRESS)
        camera.ProcessKeyboard(Camera_Movement::BACKWARD, deltaTime);
    if (glfwGetKey(window, GLFW_KEY_A) == GLFW_PRESS)
        camera.ProcessKeyboard(Camera_Movement::LEFT, deltaTime);
    if (glfwGetKey(window, GLFW_KEY_D) == GLFW_PRESS)
        camera.ProcessKeyboard(Camera_Movement::RIGHT, deltaTime);
    if (glfwGetKey(window, GLFW_KEY_SPACE) == GLFW_PRESS)
        camera.ProcessKeyboard(Camera_Movement::UP, deltaTime);
    if (glfwGetKey(window, GLFW_KEY_LEFT_CONTROL) == GLFW_PRESS)
        camera.ProcessKeyboard(Camera_Movement::DOWN, deltaTime);
}
"#;

/// Movements collected into a set, one guarded `ProcessKeyboard` call
pub const GUARDED_SET_INPUT: &str = r#"void processInput(GLFWwindow* window)
{
    if (glfwGetKey(window, GLFW_KEY_ESCAPE) == GLFW_PRESS)
        glfwSetWindowShouldClose(window, true);

    std::unordered_set<Camera_Movement> operations;

    // 问题在于斜着走会更快，不过这个暂时不用考虑
    if (glfwGetKey(window, GLFW_KEY_W) == GLFW_PRESS)
        operations.insert(Camera_Movement::FORWARD);
    if (glfwGetKey(window, GLFW_KEY_S) == GLFW_PRESS)
        operations.insert(Camera_Movement::BACKWARD);
    if (glfwGetKey(window, GLFW_KEY_A) == GLFW_PRESS)
        operations.insert(Camera_Movement::LEFT);
    if (glfwGetKey(window, GLFW_KEY_D) == GLFW_PRESS)
        operations.insert(Camera_Movement::RIGHT);
    if (glfwGetKey(window, GLFW_KEY_SPACE) == GLFW_PRESS)
        operations.insert(Camera_Movement::UP);
    if (glfwGetKey(window, GLFW_KEY_LEFT_CONTROL) == GLFW_PRESS)
        operations.insert(Camera_Movement::DOWN);

    if (!operations.empty())
        camera.ProcessKeyboard(operations, deltaTime);
}
"#;

/// Final form: brace-initialised set, unconditional call
pub const SET_INPUT_FINAL: &str = r#"void processInput(GLFWwindow* window)
{
    if (glfwGetKey(window, GLFW_KEY_ESCAPE) == GLFW_PRESS)
        glfwSetWindowShouldClose(window, true);

    std::unordered_set<Camera_Movement> operations{};

    if (glfwGetKey(window, GLFW_KEY_W) == GLFW_PRESS)
        operations.insert(Camera_Movement::FORWARD);
    if (glfwGetKey(window, GLFW_KEY_S) == GLFW_PRESS)
        operations.insert(Camera_Movement::BACKWARD);
    if (glfwGetKey(window, GLFW_KEY_A) == GLFW_PRESS)
        operations.insert(Camera_Movement::LEFT);
    if (glfwGetKey(window, GLFW_KEY_D) == GLFW_PRESS)
        operations.insert(Camera_Movement::RIGHT);
    if (glfwGetKey(window, GLFW_KEY_SPACE) == GLFW_PRESS)
        operations.insert(Camera_Movement::UP);
    if (glfwGetKey(window, GLFW_KEY_LEFT_CONTROL) == GLFW_PRESS)
        operations.insert(Camera_Movement::DOWN);

    camera.ProcessKeyboard(operations, deltaTime);
}
"#;

pub const SCROLL_CALLBACK: &str = r#"void scrollCallback(GLFWwindow* window, double offsetX, double offsetY)
{
    camera.ProcessMouseScroll(static_cast<float>(offsetY));
}
"#;

/// All built-in patches, in the order they must be applied
pub fn builtin_patches() -> Vec<Patch> {
    vec![
        Patch {
            name: SET_INPUT.to_string(),
            description: Some(
                "Collect camera movements into an unordered_set before ProcessKeyboard".to_string(),
            ),
            old_text: PER_KEY_INPUT.to_string(),
            new_text: GUARDED_SET_INPUT.to_string(),
        },
        Patch {
            name: TIDY_INPUT.to_string(),
            description: Some(
                "Brace-initialise the movement set and drop the emptiness guard".to_string(),
            ),
            old_text: GUARDED_SET_INPUT.to_string(),
            new_text: SET_INPUT_FINAL.to_string(),
        },
        Patch {
            name: DROP_SCROLL.to_string(),
            description: Some("Delete the scrollCallback definition".to_string()),
            old_text: SCROLL_CALLBACK.to_string(),
            new_text: String::new(),
        },
    ]
}

pub fn find_builtin(name: &str) -> Option<Patch> {
    builtin_patches().into_iter().find(|p| p.name == name)
}
