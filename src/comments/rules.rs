//! Static rule tables for the comment classifier.
//!
//! The tables are plain data. [`RuleSet::compile`] turns them into regexes
//! once per run; the classifier only ever borrows the compiled set.

use regex::Regex;
use serde::Serialize;

/// Which list a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Preserve,
    Remove,
    UselessPhrase,
}

/// A named, compiled pattern.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pub name: &'static str,
    pub category: Category,
    pub pattern: Regex,
}

impl ClassificationRule {
    fn compile(name: &'static str, category: Category, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            category,
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

// Matched against the comment text starting at the `//` marker.
const PRESERVE: &[(&str, &str)] = &[
    ("tag", r"(?i)^//\s*@\w+"),
    ("eslint-directive", r"(?i)^//\s*eslint-"),
    ("prettier-directive", r"(?i)^//\s*prettier-"),
    ("todo", r"(?i)^//\s*TODO:"),
    ("fixme", r"(?i)^//\s*FIXME:"),
    ("note", r"(?i)^//\s*NOTE:"),
    ("hack", r"(?i)^//\s*HACK:"),
    ("xxx", r"(?i)^//\s*XXX:"),
    ("copyright", r"(?i)^//\s*Copyright"),
    ("license", r"(?i)^//\s*License"),
    ("author", r"(?i)^//\s*Author"),
    ("url", r"(?i)^//\s*https?://"),
    ("numbered-item", r"^//\s*\d+\."),
    ("dash-item", r"^//\s*-\s"),
    ("star-item", r"^//\s*\*\s"),
    ("rule-equals", r"^//\s*=+"),
    ("rule-dashes", r"^//\s*-+"),
    ("rule-stars", r"^//\s*\*+"),
];

const REMOVE: &[(&str, &str)] = &[("empty", r"^//\s*$")];

/// Substrings that make a whole line worth keeping. Compared lowercase.
pub(crate) const IMPORTANT_KEYWORDS: &[&str] = &[
    "important",
    "critical",
    "warning",
    "danger",
    "security",
    "performance",
    "optimization",
    "config",
    "configuration",
    "api",
    "endpoint",
    "url",
    "path",
    "route",
    "middleware",
    "重要",
    "注意",
    "警告",
    "危险",
    "安全",
    "性能",
    "优化",
    "配置",
    "路由",
    "中间件",
];

/// Generic narration that restates what the next line of code does.
///
/// Each entry pairs Chinese terms (matched as a prefix of the comment body)
/// with English words (matched as a whole leading word, case-insensitive).
/// The first English word names the rule.
pub(crate) const USELESS_PHRASES: &[(&[&str], &[&str])] = &[
    // declarations and modules
    (&["导入", "引入", "引用"], &["import", "imports", "importing", "require", "requires"]),
    (&["导出"], &["export", "exports", "exporting"]),
    (&["定义", "声明"], &["define", "defines", "defining", "declare", "declares", "declaration"]),
    (&["创建", "新建", "生成"], &["create", "creates", "creating", "generate", "generates"]),
    (&["初始化"], &["init", "initialize", "initializes", "initialise", "initialization", "setup"]),
    (&["设置", "赋值"], &["set", "sets", "setting", "assign", "assigns"]),
    (&["获取", "取得", "读取"], &["get", "gets", "getting", "fetch", "fetches", "fetching", "read", "reads", "retrieve"]),
    (&["处理"], &["handle", "handles", "handling", "handler", "process", "processes", "processing"]),
    (&["渲染"], &["render", "renders", "rendering"]),
    (&["组件"], &["component", "components"]),
    (&["函数"], &["function", "functions", "func", "fn"]),
    (&["方法"], &["method", "methods"]),
    (&["变量"], &["variable", "variables", "var"]),
    (&["状态"], &["state", "states"]),
    (&["属性"], &["prop", "props", "property", "properties", "attribute", "attributes"]),
    (&["样式"], &["style", "styles", "styling", "css"]),
    (&["类"], &["class", "classes"]),
    (&["接口"], &["interface", "interfaces"]),
    (&["类型"], &["type", "types", "typedef"]),
    (&["常量"], &["const", "constant", "constants"]),
    (&["默认"], &["default", "defaults"]),
    (&["参数"], &["param", "params", "parameter", "parameters", "argument", "arguments", "args"]),
    (&["结果"], &["result", "results"]),
    (&["工具", "辅助"], &["util", "utils", "helper", "helpers"]),
    (&["钩子"], &["hook", "hooks"]),
    (&["上下文"], &["context"]),
    // control flow
    (&["如果", "判断"], &[]),
    (&["否则"], &["else"]),
    (&["循环", "遍历"], &["loop", "loops", "iterate", "iterates", "foreach"]),
    (&["返回"], &["return", "returns"]),
    (&["调用"], &["call", "calls", "invoke", "invokes"]),
    (&["执行", "运行"], &["execute", "executes", "run", "runs"]),
    (&["跳出", "继续"], &["break", "continue"]),
    (&["抛出", "捕获"], &["throw", "throws", "catch"]),
    (&["等待", "异步"], &["await", "async", "wait"]),
    (&["开始"], &["start", "starts", "begin"]),
    (&["结束"], &["end", "finish"]),
    // data structures and operations
    (&["数组", "列表"], &["array", "arrays", "list", "lists"]),
    (&["对象"], &["object", "objects"]),
    (&["字符串"], &["string", "strings"]),
    (&["数字"], &["number", "numbers"]),
    (&["布尔"], &["boolean", "bool"]),
    (&["映射", "字典"], &["map", "maps", "dict", "dictionary"]),
    (&["集合"], &["collection", "collections"]),
    (&["添加", "新增", "插入"], &["add", "adds", "append", "insert", "push"]),
    (&["删除", "移除"], &["delete", "deletes", "remove", "removes"]),
    (&["更新", "修改"], &["update", "updates", "modify"]),
    (&["清空", "重置"], &["clear", "reset"]),
    (&["排序"], &["sort", "sorting"]),
    (&["过滤", "筛选"], &["filter", "filtering"]),
    (&["查找", "搜索", "查询"], &["find", "search", "query", "lookup"]),
    (&["转换", "解析"], &["convert", "transform", "parse"]),
    (&["计算"], &["calculate", "compute"]),
    (&["合并"], &["merge", "combine"]),
    (&["复制", "克隆"], &["copy", "clone"]),
    (&["保存", "存储"], &["save", "store"]),
    (&["加载"], &["load", "loading"]),
    (&["缓存"], &["cache"]),
    (&["文件"], &["file", "files"]),
    // ui
    (&["显示", "展示"], &["show", "display"]),
    (&["隐藏"], &["hide"]),
    (&["打开"], &["open"]),
    (&["关闭"], &["close"]),
    (&["点击"], &["click", "clicked"]),
    (&["事件", "监听"], &["event", "events", "listen", "listener"]),
    (&["回调"], &["callback", "callbacks"]),
    (&["绑定"], &["bind"]),
    (&["按钮"], &["button", "buttons"]),
    (&["输入"], &["input"]),
    (&["表单"], &["form"]),
    (&["弹窗", "对话框"], &["modal", "dialog", "popup"]),
    (&["页面"], &["page", "pages"]),
    (&["布局"], &["layout"]),
    (&["容器"], &["container", "wrapper"]),
    (&["图标"], &["icon", "icons"]),
    (&["标题"], &["title", "header"]),
    (&["菜单"], &["menu"]),
    (&["标签"], &["tab", "tabs"]),
    (&["主题"], &["theme"]),
    (&["内容"], &["content"]),
    (&["编辑器"], &["editor"]),
    // networking
    (&["请求"], &["request", "requests"]),
    (&["响应"], &["response"]),
    (&["发送"], &["send", "post"]),
    (&["接收"], &["receive"]),
    (&["上传"], &["upload"]),
    (&["下载"], &["download"]),
    (&["连接"], &["connect", "connection"]),
    (&["数据"], &["data"]),
    // business roles
    (&["用户"], &["user", "users"]),
    (&["管理员"], &["admin"]),
    (&["客户"], &["customer", "client"]),
    (&["订单"], &["order", "orders"]),
    (&["商品", "产品"], &["product", "products", "item", "items"]),
    (&["登录"], &["login", "signin"]),
    (&["注册"], &["register", "signup"]),
    (&["退出", "登出"], &["logout", "signout"]),
    (&["权限", "角色"], &["permission", "permissions", "role", "roles"]),
];

/// Build the regex for one denylist entry.
pub(crate) fn useless_phrase_pattern(zh: &[&str], en: &[&str]) -> String {
    let mut alternatives: Vec<String> = zh.iter().map(|term| regex::escape(term)).collect();
    if !en.is_empty() {
        let words: Vec<String> = en.iter().map(|word| regex::escape(word)).collect();
        alternatives.push(format!(r"(?:{})\b", words.join("|")));
    }
    format!("(?i)^(?:{})", alternatives.join("|"))
}

/// The compiled rule tables used for one run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    preserve: Vec<ClassificationRule>,
    remove: Vec<ClassificationRule>,
    useless: Vec<ClassificationRule>,
}

impl RuleSet {
    pub fn compile() -> Result<Self, regex::Error> {
        let preserve = PRESERVE
            .iter()
            .map(|(name, pattern)| ClassificationRule::compile(name, Category::Preserve, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let remove = REMOVE
            .iter()
            .map(|(name, pattern)| ClassificationRule::compile(name, Category::Remove, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let useless = USELESS_PHRASES
            .iter()
            .map(|(zh, en)| {
                let name = en.first().or(zh.first()).copied().unwrap_or("phrase");
                ClassificationRule::compile(
                    name,
                    Category::UselessPhrase,
                    &useless_phrase_pattern(zh, en),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            preserve,
            remove,
            useless,
        })
    }

    /// First preserve rule matching the comment text (starting at `//`).
    pub fn preserving(&self, comment: &str) -> Option<&ClassificationRule> {
        self.preserve.iter().find(|rule| rule.is_match(comment))
    }

    /// First remove rule matching the comment text (starting at `//`).
    pub fn removing(&self, comment: &str) -> Option<&ClassificationRule> {
        self.remove.iter().find(|rule| rule.is_match(comment))
    }

    /// First denylist entry matching the start of the trimmed comment body.
    pub fn useless_phrase(&self, body: &str) -> Option<&ClassificationRule> {
        self.useless.iter().find(|rule| rule.is_match(body))
    }

    /// First important keyword contained in `line`, case-insensitively.
    pub fn important_keyword(&self, line: &str) -> Option<&'static str> {
        let lower = line.to_lowercase();
        IMPORTANT_KEYWORDS
            .iter()
            .copied()
            .find(|keyword| lower.contains(keyword))
    }
}
