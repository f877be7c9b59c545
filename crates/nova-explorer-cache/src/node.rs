use std::cell::RefCell;
use std::rc::Rc;

use nova_explorer_path::ExplorerPath;

/// Kind of an entry in the project explorer, as reported by the language server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Workspace,
    Project,
    Container,
    PackageRoot,
    Package,
    PrimaryType,
    Folder,
    File,
}

/// Raw node metadata handed over by the language server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeData {
    pub name: String,
    pub uri: String,
    pub kind: NodeKind,
    /// Child entries, once they have been fetched. `None` means "not resolved yet".
    pub children: Option<Vec<NodeData>>,
}

impl NodeData {
    pub fn new(name: impl Into<String>, uri: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            kind,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<NodeData>) -> Self {
        self.children = Some(children);
        self
    }
}

/// An explorer node backed by a location. These are the nodes the cache stores.
///
/// The uri is parsed once on construction. The metadata sits behind a `RefCell` because the
/// explorer tree and the cache share the same node and both observe `children` being reset.
#[derive(Debug)]
pub struct DataNode {
    path: ExplorerPath,
    data: RefCell<NodeData>,
}

impl DataNode {
    pub fn new(data: NodeData) -> Self {
        Self {
            path: ExplorerPath::parse(data.uri.as_str()),
            data: RefCell::new(data),
        }
    }

    pub fn path(&self) -> &ExplorerPath {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.data.borrow().kind
    }

    pub fn name(&self) -> String {
        self.data.borrow().name.clone()
    }

    /// A snapshot of the node metadata.
    pub fn data(&self) -> NodeData {
        self.data.borrow().clone()
    }

    pub fn children(&self) -> Option<Vec<NodeData>> {
        self.data.borrow().children.clone()
    }

    pub fn has_resolved_children(&self) -> bool {
        self.data.borrow().children.is_some()
    }

    pub fn set_children(&self, children: Vec<NodeData>) {
        self.data.borrow_mut().children = Some(children);
    }

    /// Forgets the resolved children so they get fetched again on next expansion.
    pub fn clear_children(&self) {
        self.data.borrow_mut().children = None;
    }
}

/// A node in the project explorer tree.
#[derive(Clone, Debug)]
pub enum ExplorerNode {
    /// Synthetic grouping node with no backing location (e.g. "Referenced Libraries").
    Container { label: String },
    Data(Rc<DataNode>),
}

impl ExplorerNode {
    pub fn container(label: impl Into<String>) -> Self {
        ExplorerNode::Container {
            label: label.into(),
        }
    }

    pub fn data(data: NodeData) -> Self {
        ExplorerNode::Data(Rc::new(DataNode::new(data)))
    }

    pub fn as_data(&self) -> Option<&Rc<DataNode>> {
        match self {
            ExplorerNode::Data(node) => Some(node),
            ExplorerNode::Container { .. } => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ExplorerNode::Container { label } => label.clone(),
            ExplorerNode::Data(node) => node.name(),
        }
    }
}

impl From<Rc<DataNode>> for ExplorerNode {
    fn from(value: Rc<DataNode>) -> Self {
        ExplorerNode::Data(value)
    }
}

impl From<DataNode> for ExplorerNode {
    fn from(value: DataNode) -> Self {
        ExplorerNode::Data(Rc::new(value))
    }
}
