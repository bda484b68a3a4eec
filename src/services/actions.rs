//! # 레코드 동작 테이블
//!
//! 관리 목록의 각 레코드에 붙은 "수정"/"삭제" 동작을 id로 찾아주는 디스패치 테이블입니다.
//! 목록을 새로 그릴 때마다 그 목록으로 다시 만들어지므로,
//! 화면에 없는 id에 대한 명령은 거부됩니다.
//!
//! 명령 형식: `e<id>` (수정), `d<id>` (삭제). 예: `e7`, `d12`

use std::collections::BTreeSet;

use crate::models::MovieRecord;

/// 레코드 하나에 대한 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Edit(i64),
    Delete(i64),
}

/// 현재 렌더링된 목록 기준의 동작 테이블
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    ids: BTreeSet<i64>,
}

impl ActionTable {
    /// 렌더링된 목록으로 테이블을 만듭니다.
    pub fn from_movies(movies: &[MovieRecord]) -> Self {
        Self {
            ids: movies.iter().map(|movie| movie.id).collect(),
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// 명령 문자열을 동작으로 바꿉니다.
    ///
    /// 형식이 틀렸거나 id가 현재 목록에 없으면 `None`.
    pub fn dispatch(&self, command: &str) -> Option<RecordAction> {
        let command = command.trim();
        // 첫 글자는 항상 ASCII('e'/'d')인지 확인한 뒤 자르므로 경계 문제가 없습니다
        let (kind, id) = match command.chars().next()? {
            'e' | 'E' => ('e', &command[1..]),
            'd' | 'D' => ('d', &command[1..]),
            _ => return None,
        };

        let id: i64 = id.trim().parse().ok()?;
        if !self.contains(id) {
            return None;
        }

        Some(match kind {
            'e' => RecordAction::Edit(id),
            _ => RecordAction::Delete(id),
        })
    }
}
