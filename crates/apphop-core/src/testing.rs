//! Test doubles for the process boundary.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::exec::{CommandOutput, CommandRunner, CommandSpec, ExecError};

type Matcher = Box<dyn Fn(&CommandSpec) -> bool + Send + Sync>;
type Responder = Box<dyn Fn(&CommandSpec) -> Result<CommandOutput, ExecError> + Send + Sync>;

/// A runner that answers from a list of (matcher, responder) rules.
///
/// The first matching rule wins. Unmatched programs behave as if they were
/// not installed. Every call is recorded.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<(Matcher, Responder)>,
    calls: Mutex<Vec<CommandSpec>>,
    spawned: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        mut self,
        matcher: impl Fn(&CommandSpec) -> bool + Send + Sync + 'static,
        respond: impl Fn(&CommandSpec) -> Result<CommandOutput, ExecError> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push((Box::new(matcher), Box::new(respond)));
        self
    }

    /// Shorthand for a rule keyed on the program file name.
    pub fn on_program(
        self,
        program: &'static str,
        respond: impl Fn(&CommandSpec) -> Result<CommandOutput, ExecError> + Send + Sync + 'static,
    ) -> Self {
        self.on(move |spec| is_program(spec, program), respond)
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn calls_to(&self, program: &str) -> Vec<CommandSpec> {
        self.calls()
            .into_iter()
            .filter(|spec| is_program(spec, program))
            .collect()
    }

    pub fn spawned(&self) -> Vec<CommandSpec> {
        self.spawned.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

/// Whether `spec` runs `program`, compared by file name without case.
pub fn is_program(spec: &CommandSpec, program: &str) -> bool {
    spec.program_name().eq_ignore_ascii_case(program)
}

/// Contents of the scratch script passed as argument `index`.
pub fn read_script_arg(spec: &CommandSpec, index: usize) -> String {
    let bytes = std::fs::read(&spec.args[index]).unwrap();
    crate::exec::types::decode_output(&bytes)
        .trim_start_matches('\u{feff}')
        .to_string()
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        self.calls.lock().unwrap().push(spec.clone());
        for (matcher, respond) in &self.rules {
            if matcher(spec) {
                return respond(spec);
            }
        }
        Err(ExecError::NotFound {
            program: spec.program.clone(),
        })
    }

    fn spawn_detached(&self, spec: &CommandSpec) -> Result<(), ExecError> {
        self.spawned.lock().unwrap().push(spec.clone());
        Ok(())
    }
}

/// An in-memory window manager.
#[derive(Default)]
pub struct FakeWindowManager {
    pub windows: Vec<crate::window::WindowDescriptor>,
    pub activatable: Vec<crate::window::WindowHandle>,
    pub activated: Mutex<Vec<crate::window::WindowHandle>>,
}

impl FakeWindowManager {
    pub fn new(windows: Vec<crate::window::WindowDescriptor>) -> Self {
        let activatable = windows.iter().map(|w| w.handle).collect();
        Self {
            windows,
            activatable,
            activated: Mutex::new(Vec::new()),
        }
    }

    pub fn activated(&self) -> Vec<crate::window::WindowHandle> {
        self.activated.lock().unwrap().clone()
    }
}

impl crate::native::WindowManager for FakeWindowManager {
    fn list_windows(&self) -> Vec<crate::window::WindowDescriptor> {
        self.windows.clone()
    }

    fn activate(&self, handle: crate::window::WindowHandle) -> bool {
        if !self.activatable.contains(&handle) {
            return false;
        }
        self.activated.lock().unwrap().push(handle);
        true
    }
}

/// Build a window descriptor for tests.
pub fn window(handle: u64, pid: u32, title: &str) -> crate::window::WindowDescriptor {
    crate::window::WindowDescriptor {
        handle: crate::window::WindowHandle::from_raw(handle),
        pid: crate::process::ProcessId::from(pid),
        title: title.to_string(),
        class_name: String::new(),
        process_name: String::new(),
        process_path: String::new(),
    }
}
