// C++ listings shown after each operation completes

use super::Operation;
use crate::list::ListVariant;

/// Full reference implementation of `operation` for `variant`
pub fn listing(operation: Operation, variant: ListVariant) -> &'static str {
    use ListVariant::{Circular, Doubly, Singly};

    match (operation, variant) {
        (Operation::InsertTail, Singly) => INSERT_TAIL_SINGLY,
        (Operation::InsertTail, Doubly) => INSERT_TAIL_DOUBLY,
        (Operation::InsertTail, Circular) => INSERT_TAIL_CIRCULAR,

        (Operation::InsertHead, Singly) => INSERT_HEAD_SINGLY,
        (Operation::InsertHead, Doubly) => INSERT_HEAD_DOUBLY,
        (Operation::InsertHead, Circular) => INSERT_HEAD_CIRCULAR,

        (Operation::InsertAt, Doubly) => INSERT_AT_DOUBLY,
        (Operation::InsertAt, Singly | Circular) => INSERT_AT_SINGLY,

        (Operation::DeleteHead, Singly) => DELETE_HEAD_SINGLY,
        (Operation::DeleteHead, Doubly) => DELETE_HEAD_DOUBLY,
        (Operation::DeleteHead, Circular) => DELETE_HEAD_CIRCULAR,

        (Operation::DeleteTail, Singly) => DELETE_TAIL_SINGLY,
        (Operation::DeleteTail, Doubly) => DELETE_TAIL_DOUBLY,
        (Operation::DeleteTail, Circular) => DELETE_TAIL_CIRCULAR,

        (Operation::DeleteAt, Doubly) => DELETE_AT_DOUBLY,
        (Operation::DeleteAt, Singly | Circular) => DELETE_AT_SINGLY,

        (Operation::Search, Circular) => SEARCH_CIRCULAR,
        (Operation::Search, Singly | Doubly) => SEARCH_LINEAR,

        (Operation::Traverse, Circular) => TRAVERSE_CIRCULAR,
        (Operation::Traverse, Singly | Doubly) => TRAVERSE_LINEAR,

        (Operation::Reverse, Singly) => REVERSE_SINGLY,
        (Operation::Reverse, Doubly) => REVERSE_DOUBLY,
        (Operation::Reverse, Circular) => REVERSE_CIRCULAR,

        (Operation::Clear, Circular) => CLEAR_CIRCULAR,
        (Operation::Clear, Singly | Doubly) => CLEAR_LINEAR,
    }
}

const INSERT_TAIL_SINGLY: &str = "\
void insertAtTail(int value) {
    Node* newNode = new Node(value);

    if (head == nullptr) {
        head = tail = newNode;
        return;
    }

    tail->next = newNode;
    tail = newNode;
}";

const INSERT_TAIL_DOUBLY: &str = "\
void insertAtTail(int value) {
    Node* newNode = new Node(value);

    if (head == nullptr) {
        head = tail = newNode;
        return;
    }

    tail->next = newNode;
    newNode->prev = tail;
    tail = newNode;
}";

const INSERT_TAIL_CIRCULAR: &str = "\
void insertAtTail(int value) {
    Node* newNode = new Node(value);

    if (head == nullptr) {
        head = tail = newNode;
        tail->next = head;
        return;
    }

    tail->next = newNode;
    tail = newNode;
    tail->next = head;
}";

const INSERT_HEAD_SINGLY: &str = "\
void insertAtHead(int value) {
    Node* newNode = new Node(value);

    if (head == nullptr) {
        head = tail = newNode;
        return;
    }

    newNode->next = head;
    head = newNode;
}";

const INSERT_HEAD_DOUBLY: &str = "\
void insertAtHead(int value) {
    Node* newNode = new Node(value);

    if (head == nullptr) {
        head = tail = newNode;
        return;
    }

    newNode->next = head;
    head->prev = newNode;
    head = newNode;
}";

const INSERT_HEAD_CIRCULAR: &str = "\
void insertAtHead(int value) {
    Node* newNode = new Node(value);

    if (head == nullptr) {
        head = tail = newNode;
        tail->next = head;
        return;
    }

    newNode->next = head;
    head = newNode;
    tail->next = head;
}";

const INSERT_AT_SINGLY: &str = "\
void insertAtPosition(int value, int index) {
    if (index == 0) {
        insertAtHead(value);
        return;
    }

    Node* newNode = new Node(value);
    Node* current = head;

    for (int i = 0; i < index - 1; i++) {
        current = current->next;
    }

    newNode->next = current->next;
    current->next = newNode;
}";

const INSERT_AT_DOUBLY: &str = "\
void insertAtPosition(int value, int index) {
    if (index == 0) {
        insertAtHead(value);
        return;
    }

    Node* newNode = new Node(value);
    Node* current = head;

    for (int i = 0; i < index - 1; i++) {
        current = current->next;
    }

    newNode->next = current->next;
    current->next->prev = newNode;
    current->next = newNode;
    newNode->prev = current;
}";

const DELETE_HEAD_SINGLY: &str = "\
void deleteAtHead() {
    if (head == nullptr) return;

    Node* temp = head;

    if (head == tail) {
        head = tail = nullptr;
    } else {
        head = head->next;
    }

    delete temp;
}";

const DELETE_HEAD_DOUBLY: &str = "\
void deleteAtHead() {
    if (head == nullptr) return;

    Node* temp = head;

    if (head == tail) {
        head = tail = nullptr;
    } else {
        head = head->next;
        head->prev = nullptr;
    }

    delete temp;
}";

const DELETE_HEAD_CIRCULAR: &str = "\
void deleteAtHead() {
    if (head == nullptr) return;

    Node* temp = head;

    if (head == tail) {
        head = tail = nullptr;
    } else {
        head = head->next;
        tail->next = head;
    }

    delete temp;
}";

const DELETE_TAIL_SINGLY: &str = "\
void deleteAtTail() {
    if (head == nullptr) return;
    if (head == tail) {
        deleteAtHead();
        return;
    }

    Node* current = head;
    while (current->next != tail) {
        current = current->next;
    }

    Node* temp = tail;
    tail = current;
    tail->next = nullptr;
    delete temp;
}";

const DELETE_TAIL_DOUBLY: &str = "\
void deleteAtTail() {
    if (head == nullptr) return;
    if (head == tail) {
        deleteAtHead();
        return;
    }

    Node* temp = tail;
    tail = tail->prev;
    tail->next = nullptr;
    delete temp;
}";

const DELETE_TAIL_CIRCULAR: &str = "\
void deleteAtTail() {
    if (head == nullptr) return;
    if (head == tail) {
        deleteAtHead();
        return;
    }

    Node* current = head;
    while (current->next != tail) {
        current = current->next;
    }

    Node* temp = tail;
    tail = current;
    tail->next = head;
    delete temp;
}";

const DELETE_AT_SINGLY: &str = "\
void deleteAtPosition(int index) {
    if (index == 0) {
        deleteAtHead();
        return;
    }

    Node* current = head;
    for (int i = 0; i < index - 1; i++) {
        current = current->next;
    }

    Node* toDelete = current->next;
    current->next = toDelete->next;
    delete toDelete;
}";

const DELETE_AT_DOUBLY: &str = "\
void deleteAtPosition(int index) {
    if (index == 0) {
        deleteAtHead();
        return;
    }

    Node* current = head;
    for (int i = 0; i < index - 1; i++) {
        current = current->next;
    }

    Node* toDelete = current->next;
    current->next = toDelete->next;
    toDelete->next->prev = current;
    delete toDelete;
}";

const SEARCH_LINEAR: &str = "\
int search(int value) {
    Node* current = head;
    int index = 0;

    while (current != nullptr) {
        if (current->data == value) {
            return index;
        }
        current = current->next;
        index++;
    }

    return -1;
}";

const SEARCH_CIRCULAR: &str = "\
int search(int value) {
    if (head == nullptr) return -1;

    Node* current = head;
    int index = 0;

    do {
        if (current->data == value) {
            return index;
        }
        current = current->next;
        index++;
    } while (current != head);

    return -1;
}";

const TRAVERSE_LINEAR: &str = "\
void traverse() {
    Node* current = head;
    while (current != nullptr) {
        cout << current->data << \" -> \";
        current = current->next;
    }
    cout << \"NULL\" << endl;
}";

const TRAVERSE_CIRCULAR: &str = "\
void traverse() {
    if (head == nullptr) return;

    Node* current = head;
    do {
        cout << current->data << \" -> \";
        current = current->next;
    } while (current != head);
    cout << \"(head)\" << endl;
}";

const REVERSE_SINGLY: &str = "\
void reverse() {
    Node* prev = nullptr;
    Node* current = head;
    Node* next = nullptr;

    tail = head;

    while (current != nullptr) {
        next = current->next;
        current->next = prev;
        prev = current;
        current = next;
    }

    head = prev;
}";

const REVERSE_DOUBLY: &str = "\
void reverse() {
    Node* current = head;
    Node* temp = nullptr;

    while (current != nullptr) {
        temp = current->prev;
        current->prev = current->next;
        current->next = temp;
        current = current->prev;
    }

    if (temp != nullptr) {
        tail = head;
        head = temp->prev;
    }
}";

const REVERSE_CIRCULAR: &str = "\
void reverse() {
    if (head == nullptr) return;

    Node* prev = nullptr;
    Node* current = head;
    Node* next = nullptr;
    Node* stopNode = head;

    do {
        next = current->next;
        current->next = prev;
        prev = current;
        current = next;
    } while (current != stopNode);

    tail = head;
    head = prev;
    tail->next = head;
}";

const CLEAR_LINEAR: &str = "\
void clear() {
    Node* current = head;
    while (current != nullptr) {
        Node* next = current->next;
        delete current;
        current = next;
    }
    head = tail = nullptr;
}";

const CLEAR_CIRCULAR: &str = "\
void clear() {
    if (head == nullptr) return;

    tail->next = nullptr;
    Node* current = head;
    while (current != nullptr) {
        Node* next = current->next;
        delete current;
        current = next;
    }
    head = tail = nullptr;
}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_has_a_listing() {
        for operation in Operation::ALL {
            for variant in ListVariant::ALL {
                let text = listing(operation, variant);
                assert!(text.ends_with('}'), "{:?}/{:?}", operation, variant);
            }
        }
    }

    #[test]
    fn test_variant_specific_lines() {
        assert!(listing(Operation::InsertTail, ListVariant::Circular).contains("tail->next = head;"));
        assert!(listing(Operation::InsertHead, ListVariant::Doubly).contains("head->prev = newNode;"));
        assert!(!listing(Operation::InsertHead, ListVariant::Singly).contains("prev"));
    }
}
