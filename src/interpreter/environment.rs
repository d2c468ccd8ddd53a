/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      environment.rs
 * Purpose:   Lexical frames and the registry that tears them down.
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the MazeScript project.
 * 
 * MazeScript is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::error::{ScriptError, ScriptResult};
use crate::value::Value;

pub type EnvRef = Rc<RefCell<Environment>>;

/// One level of name bindings in the lexical scope chain.
///
/// Frames only point at their parent. A closure stored in a frame it also
/// captures forms an `Rc` cycle, which [`FrameRegistry`] breaks when the
/// owning interpreter goes away.
#[derive(Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    pub fn new(parent: Option<EnvRef>) -> Self {
        Self {
            values: HashMap::new(),
            parent,
        }
    }

    /// Binds `name` in this frame.
    ///
    /// # Errors
    /// Reference error when `name` is already bound in this same frame.
    /// Shadowing a binding from a parent frame is allowed.
    pub fn declare(&mut self, name: &str, value: Value) -> ScriptResult<()> {
        if self.values.contains_key(name) {
            return Err(ScriptError::reference_error(format!(
                "'{}' is already declared.",
                name
            )));
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Looks `name` up through this frame and its ancestors.
    pub fn get(&self, name: &str) -> ScriptResult<Value> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }

        match &self.parent {
            Some(parent) => parent.borrow().get(name),
            None => Err(undeclared(name)),
        }
    }

    /// Rebinds the nearest existing `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> ScriptResult<()> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(undeclared(name)),
        }
    }

    /// Drops every binding and the parent link.
    pub fn clear(&mut self) {
        self.values.clear();
        self.parent = None;
    }
}

fn undeclared(name: &str) -> ScriptError {
    ScriptError::reference_error(format!("'{}' is undeclared.", name))
}

/// Weak handles to every frame an interpreter created.
///
/// Dead entries are pruned whenever the list doubles past its last
/// compacted size.
pub struct FrameRegistry {
    frames: Vec<Weak<RefCell<Environment>>>,
    high_water: usize,
}

const MIN_HIGH_WATER: usize = 64;

impl FrameRegistry {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            high_water: MIN_HIGH_WATER,
        }
    }

    /// Creates a tracked frame.
    pub fn create(&mut self, parent: Option<EnvRef>) -> EnvRef {
        let frame = Rc::new(RefCell::new(Environment::new(parent)));
        self.track(&frame);
        frame
    }

    pub fn track(&mut self, frame: &EnvRef) {
        if self.frames.len() >= self.high_water {
            self.frames.retain(|weak| weak.strong_count() > 0);
            self.high_water = (self.frames.len() * 2).max(MIN_HIGH_WATER);
        }
        self.frames.push(Rc::downgrade(frame));
    }

    pub fn live(&self) -> usize {
        self.frames.iter().filter(|weak| weak.strong_count() > 0).count()
    }

    /// Clears every frame that is still alive, releasing closure cycles.
    pub fn release_all(&mut self) {
        for weak in self.frames.drain(..) {
            if let Some(frame) = weak.upgrade() {
                // A frame can only be borrowed while the interpreter runs.
                if let Ok(mut frame) = frame.try_borrow_mut() {
                    frame.clear();
                }
            }
        }
    }
}

impl Default for FrameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, Lambda};
    use crate::error::ErrorKind;
    use crate::value::Closure;

    #[test]
    fn lookup_walks_parents() {
        let mut registry = FrameRegistry::new();
        let globals = registry.create(None);
        globals.borrow_mut().declare("x", Value::Integer(1)).unwrap();

        let child = registry.create(Some(Rc::clone(&globals)));
        assert_eq!(child.borrow().get("x").unwrap(), Value::Integer(1));

        child.borrow_mut().assign("x", Value::Integer(5)).unwrap();
        assert_eq!(globals.borrow().get("x").unwrap(), Value::Integer(5));
    }

    #[test]
    fn redeclaring_in_same_frame_fails() {
        let mut env = Environment::new(None);
        env.declare("x", Value::Integer(1)).unwrap();
        let err = env.declare("x", Value::Integer(2)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Reference);
        assert_eq!(err.message, "'x' is already declared.");
    }

    #[test]
    fn shadowing_parent_is_allowed() {
        let parent = Rc::new(RefCell::new(Environment::new(None)));
        parent.borrow_mut().declare("x", Value::Integer(1)).unwrap();
        let mut child = Environment::new(Some(Rc::clone(&parent)));
        child.declare("x", Value::Integer(2)).unwrap();
        assert_eq!(child.get("x").unwrap(), Value::Integer(2));
        assert_eq!(parent.borrow().get("x").unwrap(), Value::Integer(1));
    }

    #[test]
    fn undeclared_names_fail() {
        let mut env = Environment::new(None);
        assert_eq!(env.get("y").unwrap_err().message, "'y' is undeclared.");
        assert_eq!(
            env.assign("y", Value::Integer(0)).unwrap_err().kind,
            ErrorKind::Reference
        );
    }

    #[test]
    fn release_breaks_closure_cycles() {
        let mut registry = FrameRegistry::new();
        let frame = registry.create(None);
        let lambda = Rc::new(Lambda {
            params: vec![],
            body: Block::default(),
        });
        let closure = Value::Closure(Rc::new(Closure {
            lambda,
            env: Rc::clone(&frame),
        }));
        frame.borrow_mut().declare("f", closure).unwrap();

        let weak = Rc::downgrade(&frame);
        drop(frame);
        assert!(weak.upgrade().is_some());

        registry.release_all();
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn registry_prunes_dead_frames() {
        let mut registry = FrameRegistry::new();
        for _ in 0..(MIN_HIGH_WATER * 3) {
            registry.create(None);
        }
        assert!(registry.frames.len() <= MIN_HIGH_WATER + 1);
        assert_eq!(registry.live(), 0);
    }
}
