//! 向导页的交互状态：当前聚焦字段与编辑缓冲
//!
//! 状态机只关心步骤与提交；光标、编辑中的文本这些纯界面状态放在这里。
use crate::wizard::fields::{fields_for, FieldKind, FieldSpec};
use crate::wizard::machine::{Wizard, WizardAction, WizardEffect};

#[derive(Debug, Clone)]
pub struct WizardPage {
    pub wizard: Wizard,
    cursor: usize,
    editing: Option<String>,
}

impl WizardPage {
    pub fn new(entity_id: u64, unit_id: u64) -> Self {
        Self {
            wizard: Wizard::new(entity_id, unit_id),
            cursor: 0,
            editing: None,
        }
    }

    pub fn fields(&self) -> Vec<&'static FieldSpec> {
        fields_for(self.wizard.step())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused(&self) -> Option<&'static FieldSpec> {
        self.fields().get(self.cursor).copied()
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn move_cursor(&mut self, down: bool) {
        let len = self.fields().len();
        if len == 0 || self.editing.is_some() {
            return;
        }
        self.cursor = if down {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    /// 文本字段进入编辑；选择字段向前切换一项
    pub fn activate(&mut self) {
        if !self.wizard.is_editable() {
            return;
        }
        let Some(spec) = self.focused() else {
            return;
        };
        if spec.is_textual() {
            let current = self.wizard.draft().get(spec.name).unwrap_or_default();
            self.editing = Some(current.to_string());
        } else {
            self.cycle(true);
        }
    }

    pub fn cycle(&mut self, forward: bool) {
        let Some(spec) = self.focused() else {
            return;
        };
        let current = self.wizard.draft().get(spec.name);
        if let Some(next) = spec.cycle_option(current, forward) {
            self.wizard.set_field(spec.name, next);
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(buf) = self.editing.as_mut() {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.editing.as_mut() {
            buf.pop();
        }
    }

    /// 多行字段里的换行
    pub fn newline(&mut self) {
        if matches!(self.focused().map(|f| f.kind), Some(FieldKind::TextArea)) {
            self.push_char('\n');
        }
    }

    /// 写回草稿并退出编辑
    pub fn commit_edit(&mut self) {
        if let (Some(buf), Some(spec)) = (self.editing.take(), self.focused()) {
            self.wizard.set_field(spec.name, buf);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// 转发给状态机；步骤变化时重置光标
    pub fn dispatch(&mut self, action: WizardAction) -> Option<WizardEffect> {
        if self.editing.is_some() {
            self.commit_edit();
        }
        let before = self.wizard.step();
        let effect = self.wizard.dispatch(action);
        if self.wizard.step() != before {
            self.cursor = 0;
        }
        effect
    }
}
