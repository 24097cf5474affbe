#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarAction {
    ClickedMenu,
}

impl SidebarState {
    pub fn apply(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::ClickedMenu => self.open = !self.open,
        }
    }
}
