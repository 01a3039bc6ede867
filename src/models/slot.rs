/// 选项位置枚举
///
/// 题目固定四个选项位置，按 A→D 的规范顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

/// 选项位置数量
pub const SLOT_COUNT: usize = 4;

impl Slot {
    /// 规范顺序
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::A, Slot::B, Slot::C, Slot::D];

    /// 获取数组下标
    pub fn index(self) -> usize {
        self as usize
    }

    /// 获取字母
    pub fn letter(self) -> char {
        match self {
            Slot::A => 'A',
            Slot::B => 'B',
            Slot::C => 'C',
            Slot::D => 'D',
        }
    }

    /// 获取 JSON 键名
    pub fn key(self) -> &'static str {
        match self {
            Slot::A => "A",
            Slot::B => "B",
            Slot::C => "C",
            Slot::D => "D",
        }
    }

    /// 从字母解析（精确匹配，大写）
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Slot::A),
            "B" => Some(Slot::B),
            "C" => Some(Slot::C),
            "D" => Some(Slot::D),
            _ => None,
        }
    }

    /// 宽松解析：忽略首尾空白和大小写
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_letter(&s.trim().to_ascii_uppercase())
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
